//! Task list page for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only behind `RequireAuth`. Loads the list once on mount and
//! applies create/toggle/delete results locally instead of refetching. Full
//! edits happen on the task form page; deletes go through `TaskDelete`. A 401
//! from any call is shown as a message; the user stays on the page until they
//! log out or the guard bounces them.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;

use crate::components::task_delete::TaskDelete;
use crate::error::ApiError;
use crate::net::types::{Task, TaskCreate, TaskUpdate};
use crate::state::auth::{AuthState, use_session};

pub(crate) const TITLE_MAX_LENGTH: usize = 200;

/// Build a create request from the form fields. Blank description is omitted.
pub(crate) fn new_task_input(title: &str, description: &str) -> Result<TaskCreate, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required.");
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err("Title must be at most 200 characters.");
    }
    let description = description.trim();
    Ok(TaskCreate {
        title: title.to_owned(),
        description: (!description.is_empty()).then(|| description.to_owned()),
        completed: None,
    })
}

/// Update that flips `completed` and nothing else.
pub(crate) fn toggle_update(task: &Task) -> TaskUpdate {
    TaskUpdate { completed: Some(!task.completed), ..TaskUpdate::default() }
}

/// Replace the task with the same id in place; unknown ids are appended.
pub(crate) fn upsert_task(tasks: &mut Vec<Task>, task: Task) {
    match tasks.iter_mut().find(|t| t.id == task.id) {
        Some(slot) => *slot = task,
        None => tasks.push(task),
    }
}

pub(crate) fn edit_href(id: i64) -> String {
    format!("/tasks/{id}/edit")
}

pub(crate) fn task_error_message(err: &ApiError) -> String {
    err.to_string()
}

#[derive(Clone, Debug, Default, PartialEq)]
struct TasksState {
    items: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let session = use_session();
    let auth = expect_context::<RwSignal<AuthState>>();
    let state = RwSignal::new(TasksState { loading: true, ..TasksState::default() });
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    // TaskApi holds `Rc`s, so handlers fetch it from the local handle per call.
    let api = move || session.with_value(|s| s.tasks.clone());
    {
        let api = api();
        leptos::task::spawn_local(async move {
            let result = api.list().await;
            state.update(|s| {
                s.loading = false;
                match result {
                    Ok(items) => s.items = items,
                    Err(e) => s.error = Some(task_error_message(&e)),
                }
            });
        });
    }

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = match new_task_input(&title.get_untracked(), &description.get_untracked()) {
            Ok(input) => input,
            Err(message) => {
                state.update(|s| s.error = Some(message.to_owned()));
                return;
            }
        };
        let api = api();
        leptos::task::spawn_local(async move {
            match api.create(&input).await {
                Ok(task) => {
                    title.set(String::new());
                    description.set(String::new());
                    state.update(|s| {
                        s.error = None;
                        upsert_task(&mut s.items, task);
                    });
                }
                Err(e) => state.update(|s| s.error = Some(task_error_message(&e))),
            }
        });
    };

    let on_toggle = Callback::new(move |task: Task| {
        let api = api();
        leptos::task::spawn_local(async move {
            match api.update(task.id, &toggle_update(&task)).await {
                Ok(updated) => state.update(|s| upsert_task(&mut s.items, updated)),
                Err(e) => state.update(|s| s.error = Some(task_error_message(&e))),
            }
        });
    });

    let on_deleted = Callback::new(move |id: i64| state.update(|s| s.items.retain(|t| t.id != id)));
    let on_delete_error = Callback::new(move |message: String| state.update(|s| s.error = Some(message)));

    let on_logout = move |_| session.with_value(|s| s.auth.logout());

    view! {
        <div class="tasks-page">
            <header class="tasks-page__header toolbar">
                <span class="toolbar__title">"My Tasks"</span>
                <a class="btn toolbar__new-task" href="/tasks/new">"+ New Task"</a>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">
                    {move || format!("Hello, {}", auth.get().display_name().unwrap_or("there"))}
                </span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>

            <form class="tasks-page__form" on:submit=on_create>
                <input
                    class="tasks-page__input"
                    type="text"
                    placeholder="New task"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <input
                    class="tasks-page__input"
                    type="text"
                    placeholder="Description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Add"</button>
            </form>

            <Show when=move || state.get().error.is_some()>
                <p class="tasks-page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>

            <Show when=move || !state.get().loading fallback=move || view! { <p>"Loading tasks..."</p> }>
                <Show
                    when=move || !state.get().items.is_empty()
                    fallback=move || view! { <p class="tasks-page__empty">"No tasks yet."</p> }
                >
                    <ul class="tasks-page__list">
                        <For
                            each=move || state.get().items
                            key=|task| (task.id, task.completed, task.updated_at.clone())
                            children=move |task| view! { <TaskRow task on_toggle on_deleted on_delete_error/> }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn TaskRow(
    task: Task,
    on_toggle: Callback<Task>,
    on_deleted: Callback<i64>,
    on_delete_error: Callback<String>,
) -> impl IntoView {
    let id = task.id;
    let completed = task.completed;
    let title = task.title.clone();
    let description = task.description.clone();

    view! {
        <li class=if completed { "task-row task-row--done" } else { "task-row" }>
            <input
                type="checkbox"
                prop:checked=completed
                on:change=move |_| on_toggle.run(task.clone())
            />
            <span class="task-row__title">{title}</span>
            {description.map(|d| view! { <span class="task-row__description">{d}</span> })}
            <a class="btn task-row__edit" href=edit_href(id)>"Edit"</a>
            <TaskDelete task_id=id on_deleted on_error=on_delete_error/>
        </li>
    }
}
