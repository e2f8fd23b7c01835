//! Delete button with an inline "are you sure?" step.

#[cfg(test)]
#[path = "task_delete_test.rs"]
mod task_delete_test;

use leptos::prelude::*;

use crate::error::MSG_DELETE_TASK_FAILED;
use crate::state::auth::use_session;

/// Where the delete control is in its confirm flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteStep {
    #[default]
    Idle,
    Confirming,
    Deleting,
}

impl DeleteStep {
    /// First click: ask for confirmation.
    #[must_use]
    pub fn request(self) -> Self {
        match self {
            Self::Idle => Self::Confirming,
            other => other,
        }
    }

    /// Confirmed; only valid while confirming.
    #[must_use]
    pub fn confirm(self) -> Self {
        match self {
            Self::Confirming => Self::Deleting,
            other => other,
        }
    }

    /// Back out. A delete already in flight cannot be cancelled.
    #[must_use]
    pub fn cancel(self) -> Self {
        match self {
            Self::Confirming => Self::Idle,
            other => other,
        }
    }
}

#[component]
pub fn TaskDelete(task_id: i64, on_deleted: Callback<i64>, on_error: Callback<String>) -> impl IntoView {
    let session = use_session();
    let step = RwSignal::new(DeleteStep::Idle);

    let on_confirm = move |_| {
        if step.get_untracked() != DeleteStep::Confirming {
            return;
        }
        step.update(|s| *s = s.confirm());
        let api = session.with_value(|s| s.tasks.clone());
        leptos::task::spawn_local(async move {
            let result = api.delete(task_id).await;
            step.set(DeleteStep::Idle);
            match result {
                Ok(_) => on_deleted.run(task_id),
                Err(e) => on_error.run(e.user_message(MSG_DELETE_TASK_FAILED)),
            }
        });
    };

    view! {
        <span class="task-delete">
            <Show
                when=move || step.get() != DeleteStep::Idle
                fallback=move || view! {
                    <button class="btn task-delete__start" on:click=move |_| step.update(|s| *s = s.request())>
                        "Delete"
                    </button>
                }
            >
                <span class="task-delete__confirm">"Are you sure?"</span>
                <button
                    class="btn btn--danger"
                    disabled=move || step.get() == DeleteStep::Deleting
                    on:click=on_confirm
                >
                    {move || if step.get() == DeleteStep::Deleting { "Deleting..." } else { "Yes, delete" }}
                </button>
                <button
                    class="btn"
                    disabled=move || step.get() == DeleteStep::Deleting
                    on:click=move |_| step.update(|s| *s = s.cancel())
                >
                    "Cancel"
                </button>
            </Show>
        </span>
    }
}
