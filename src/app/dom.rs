//! WASM application implementation
//!
//! Mounts [`App`] onto the signup page. The page provides `#activities-list`,
//! `#signup-form`, `#email`, `#activity` and `#message`; this module only
//! copies state between those elements and the application.

use std::rc::Rc;

use futures::lock::Mutex;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use super::{App, SignupForm, UiEvent};
use crate::client::gloo::WasmClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::interface::{Confirm, HttpClient, Timer};
use crate::notification::{HideTicket, SharedNotifications};
use crate::view;

type BrowserApp = App<WasmClient, WindowConfirm, GlooTimer>;

// Helper function to convert JsValue errors to our error type
fn js_err(err: JsValue) -> Error {
    ErrorKind::DomError(format!("{err:?}")).into()
}

/// `window.confirm`, treated as declined when no window is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

/// Hides the message element once a ticket expires.
#[derive(Debug, Clone)]
pub struct GlooTimer {
    message: Element,
}

impl Timer for GlooTimer {
    fn schedule_hide(&self, notifications: SharedNotifications, ticket: HideTicket) {
        let message = self.message.clone();
        spawn_local(async move {
            gloo_timers::future::sleep(ticket.delay()).await;
            if notifications.expire(ticket).await {
                if let Err(e) = message.class_list().add_1("hidden").map_err(js_err) {
                    log::error!("Failed to hide message: {e}");
                }
            }
        });
    }
}

struct Page {
    list: Element,
    select: HtmlSelectElement,
    form: HtmlFormElement,
    email: HtmlInputElement,
    message: Element,
}

impl Page {
    fn locate(document: &Document) -> Result<Self> {
        Ok(Self {
            list: by_id(document, "activities-list")?,
            select: by_id(document, "activity")?,
            form: by_id(document, "signup-form")?,
            email: by_id(document, "email")?,
            message: by_id(document, "message")?,
        })
    }

    fn entered(&self) -> SignupForm {
        SignupForm {
            email: self.email.value(),
            activity: self.select.value(),
        }
    }

    fn read_form(&self, app: &mut BrowserApp) {
        *app.form_mut() = self.entered();
    }

    /// Redraws list, selector and message. Whatever is typed into the form
    /// survives the repaint unless `cleared` is set.
    async fn paint(&self, app: &BrowserApp, cleared: bool) -> Result<()> {
        let state = app.state();
        let form = SignupForm::repainted(self.entered(), cleared, &state.selector);

        self.list.set_inner_html(&state.list.to_html()?);
        // options are replaced wholesale, never appended
        self.select.set_inner_html(&state.selector.to_html()?);
        self.select.set_value(&form.activity);
        if self.email.value() != form.email {
            self.email.set_value(&form.email);
        }

        let notifications = app.notifications();
        if let Some(shown) = notifications.last().await {
            self.message.set_text_content(Some(&shown.text));
        }
        self.message.set_class_name(&notifications.class_name().await);
        Ok(())
    }
}

fn by_id<E: JsCast>(document: &Document, id: &str) -> Result<E> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ErrorKind::DomError(format!("missing #{id}")))?
        .dyn_into::<E>()
        .map_err(|_| ErrorKind::DomError(format!("#{id} has an unexpected element type")).into())
}

async fn run(app: Rc<Mutex<BrowserApp>>, page: Rc<Page>, event: Option<UiEvent>) {
    let mut app = app.lock().await;
    if let Some(event) = event {
        page.read_form(&mut app);
        app.dispatch(event).await;
    }
    let cleared = app.take_form_cleared();
    if let Err(e) = page.paint(&app, cleared).await {
        log::error!("Failed to render page: {e}");
    }
}

/// Wires the page up and performs the initial load.
pub async fn mount() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| ErrorKind::DomError("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ErrorKind::DomError("no document".to_string()))?;
    let origin = window.location().origin().map_err(js_err)?;

    let config = ClientConfig::new(&origin)?;
    let page = Rc::new(Page::locate(&document)?);
    let client = WasmClient::new(&config).await?;
    let timer = GlooTimer {
        message: page.message.clone(),
    };
    let app = Rc::new(Mutex::new(App::new(client, WindowConfirm, timer, &config)));

    {
        let app = Rc::clone(&app);
        let page_ref = Rc::clone(&page);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            spawn_local(run(
                Rc::clone(&app),
                Rc::clone(&page_ref),
                Some(UiEvent::SubmitSignup),
            ));
        });
        page.form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_submit.forget();
    }

    // one listener for every delete button, surviving list re-renders
    {
        let app = Rc::clone(&app);
        let page_ref = Rc::clone(&page);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(button)) = target.closest(".delete-btn") else {
                return;
            };
            event.prevent_default();

            let entry = view::delete_target(
                button.get_attribute("data-activity"),
                button.get_attribute("data-participant"),
            );
            if let Some(entry) = entry {
                spawn_local(run(
                    Rc::clone(&app),
                    Rc::clone(&page_ref),
                    Some(UiEvent::DeleteClicked(entry)),
                ));
            }
        });
        page.list
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_click.forget();
    }

    run(Rc::clone(&app), Rc::clone(&page), None).await;
    run(app, page, Some(UiEvent::PageLoaded)).await;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Debug);

    spawn_local(async {
        if let Err(e) = mount().await {
            log::error!("Failed to start activity signup: {e}");
        }
    });
}
