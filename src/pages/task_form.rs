//! Create and edit form for a single task.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/tasks/new` and `/tasks/:id/edit`, both behind `RequireAuth`.
//! Edit mode loads the task first and fills the form; saving goes back to
//! `/tasks`. An id that is not a positive integer never reaches the server.

#[cfg(test)]
#[path = "task_form_test.rs"]
mod task_form_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::tasks::TITLE_MAX_LENGTH;
use crate::error::{ApiError, MSG_CREATE_TASK_FAILED, MSG_LOAD_TASK_FAILED, MSG_UPDATE_TASK_FAILED};
use crate::net::types::{Task, TaskCreate, TaskUpdate};
use crate::state::auth::use_session;

const TASKS_ROUTE: &str = "/tasks";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    /// Mode for the route's `id` parameter; `None` means `/tasks/new`.
    pub(crate) fn from_param(id: Option<&str>) -> Result<Self, &'static str> {
        match id {
            None => Ok(Self::Create),
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(id) if id > 0 => Ok(Self::Edit(id)),
                _ => Err("Invalid task id."),
            },
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Create => "New task",
            Self::Edit(_) => "Edit task",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => MSG_CREATE_TASK_FAILED,
            Self::Edit(_) => MSG_UPDATE_TASK_FAILED,
        }
    }
}

/// Validated form fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TaskForm {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TaskForm {
    pub(crate) fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            completed: task.completed,
        }
    }

    /// New tasks omit an empty description.
    pub(crate) fn to_create(&self) -> TaskCreate {
        TaskCreate {
            title: self.title.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            completed: Some(self.completed),
        }
    }

    /// Edits always send every field. An empty description clears it
    /// server-side; leaving it out would keep the old text.
    pub(crate) fn to_update(&self) -> TaskUpdate {
        TaskUpdate {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            completed: Some(self.completed),
        }
    }
}

pub(crate) fn validate_task_form(title: &str, description: &str, completed: bool) -> Result<TaskForm, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required.");
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err("Title must be at most 200 characters.");
    }
    Ok(TaskForm {
        title: title.to_owned(),
        description: description.trim().to_owned(),
        completed,
    })
}

#[component]
pub fn TaskFormPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let params = use_params_map();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let completed = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let mode = FormMode::from_param(params.read_untracked().get("id").as_deref());
    let form_mode = match mode {
        Ok(mode) => mode,
        Err(message) => {
            error.set(Some(message.to_owned()));
            FormMode::Create
        }
    };
    let invalid_route = mode.is_err();

    if let Ok(FormMode::Edit(id)) = mode {
        loading.set(true);
        let api = session.with_value(|s| s.tasks.clone());
        leptos::task::spawn_local(async move {
            let result = api.get(id).await;
            loading.set(false);
            match result {
                Ok(task) => {
                    let form = TaskForm::from_task(&task);
                    title.set(form.title);
                    description.set(form.description);
                    completed.set(form.completed);
                }
                Err(e) => error.set(Some(e.user_message(MSG_LOAD_TASK_FAILED))),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if invalid_route || saving.get_untracked() || loading.get_untracked() {
            return;
        }
        let form = match validate_task_form(&title.get_untracked(), &description.get_untracked(), completed.get_untracked()) {
            Ok(form) => form,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };

        error.set(None);
        saving.set(true);
        let api = session.with_value(|s| s.tasks.clone());
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result: Result<Task, ApiError> = match form_mode {
                FormMode::Create => api.create(&form.to_create()).await,
                FormMode::Edit(id) => api.update(id, &form.to_update()).await,
            };
            saving.set(false);
            match result {
                Ok(task) => {
                    log::info!("task saved: id={}", task.id);
                    navigate(TASKS_ROUTE, NavigateOptions::default());
                }
                Err(e) => error.set(Some(e.user_message(form_mode.failure_message()))),
            }
        });
    };

    view! {
        <div class="task-form-page">
            <h1>{form_mode.heading()}</h1>
            <Show when=move || loading.get()>
                <p>"Loading task..."</p>
            </Show>
            <form class="task-form" on:submit=on_submit>
                <input
                    class="task-form__input"
                    type="text"
                    placeholder="Title"
                    maxlength=TITLE_MAX_LENGTH.to_string()
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class="task-form__input"
                    placeholder="Description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <label class="task-form__check">
                    <input
                        type="checkbox"
                        prop:checked=move || completed.get()
                        on:change=move |ev| completed.set(event_target_checked(&ev))
                    />
                    "Completed"
                </label>
                <div class="task-form__actions">
                    <a class="btn" href=TASKS_ROUTE>"Cancel"</a>
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || invalid_route || saving.get() || loading.get()
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="task-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
