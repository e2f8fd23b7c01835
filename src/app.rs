//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::require_auth::RequireAuth;
use crate::pages::{login::LoginPage, register::RegisterPage, task_form::TaskFormPage, tasks::TasksPage};
use crate::state::auth::SessionProvider;

/// Root application component.
///
/// The session is built inside the router so logout can navigate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Task Manager"/>

        <Router>
            <SessionProvider>
                <Routes fallback=|| view! { <Redirect path="/tasks"/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("tasks")
                        view=|| view! { <RequireAuth><TasksPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("tasks"), StaticSegment("new"))
                        view=|| view! { <RequireAuth><TaskFormPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("tasks"), ParamSegment("id"), StaticSegment("edit"))
                        view=|| view! { <RequireAuth><TaskFormPage/></RequireAuth> }
                    />
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/tasks"/> }/>
                </Routes>
            </SessionProvider>
        </Router>
    }
}
