//! Error boundaries keeping one broken view from blanking the dashboard.

use dioxus::prelude::*;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    h1 {
                        style: "color:red; font-size: 40px; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px;",
                        "Something went wrong",
                    }
                    p {
                        style: "color:darkred; font-size: 20px; margin: 15px;",
                        "Boundary: {boundary_name}"
                    }
                    a {
                        href: "/",
                        style: "color:blue; font-size: 20px; margin: 15px;",
                        "Back to question import"
                    }
                    pre {
                        style: "color:black; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px; text-wrap: auto;",
                        "{err:#?}"
                    }
                }
            },
            children
        }
    }
}

/// Wraps a single question card; a render failure shows inline with a retry.
#[component]
pub fn QuestionErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(error) => format!("{:#?}", error.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    div {
                        style: "border: 1px solid red; border-radius: 8px; padding: 12px; margin: 8px 0;",
                        pre {
                            style: "color:darkred; text-wrap: auto; max-height: 200px; overflow-y: auto;",
                            "{error_txt}"
                        }
                        button {
                            style: "color:blue; font-size: 16px; border: 1px solid blue; padding: 6px 12px; border-radius: 5px;",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try Again"
                        }
                    }
                }
            },
            {children}
        }
    }
}
