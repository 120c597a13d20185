use dioxus::prelude::*;
use guide_viewer_client::{CreateGuideRequest, GuideClient};

const CREATE_FAILED_MESSAGE: &str = "Error creating guide. Please try again.";

#[component]
pub fn CreateGuide() -> Element {
    let client = use_context::<GuideClient>();
    let mut topic = use_signal(String::new);
    let mut audience_level = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut message = use_signal(String::new);
    // Task started by the last successful submission, and its polled state.
    let mut started_task = use_signal(|| None::<String>);
    let mut task_state = use_signal(|| None::<String>);

    let on_submit = {
        let client = client.clone();
        move |_| {
            let request = CreateGuideRequest {
                topic: topic(),
                audience_level: audience_level(),
            };
            loading.set(true);
            message.set(String::new());
            let client = client.clone();
            spawn(async move {
                match client.create_guide(&request).await {
                    Ok(response) => {
                        message.set(response.message);
                        started_task.set(response.task_id);
                        task_state.set(None);
                        topic.set(String::new());
                        audience_level.set(String::new());
                    }
                    Err(_) => message.set(CREATE_FAILED_MESSAGE.to_string()),
                }
                loading.set(false);
            });
        }
    };

    let on_check_status = move |_| {
        let Some(task_id) = started_task() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let state = match client.task_status(&task_id).await {
                Some(status) => status.status.label().to_string(),
                None => "unknown".to_string(),
            };
            task_state.set(Some(state));
        });
    };

    let button_label = if loading() { "Creating..." } else { "Create Guide" };

    rsx! {
        div {
            class: "page create-guide",
            h1 { "Create a Guide" }
            label {
                class: "field",
                span { "Topic" }
                input {
                    class: "text-input",
                    value: "{topic}",
                    oninput: move |event| topic.set(event.value()),
                }
            }
            label {
                class: "field",
                span { "Audience Level" }
                input {
                    class: "text-input",
                    value: "{audience_level}",
                    oninput: move |event| audience_level.set(event.value()),
                }
            }
            button {
                class: "primary-button wide",
                disabled: loading(),
                onclick: on_submit,
                "{button_label}"
            }
            if !message.read().is_empty() {
                p { class: "form-message", "{message}" }
            }
            if let Some(task_id) = started_task() {
                div {
                    class: "task-status",
                    span { "Task {task_id}" }
                    button { class: "secondary-button", onclick: on_check_status, "Check status" }
                    if let Some(state) = task_state() {
                        span { class: "task-state", "Status: {state}" }
                    }
                }
            }
        }
    }
}
