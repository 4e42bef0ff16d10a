//! Page shell and page-load controller.
//! The shell carries the fixed containers every menu page has: static and
//! dynamic menu containers, the loading indicator and the error banner.
//! A load decides which of them is visible and binds a `MenuView` to the
//! menu that ends up on screen.

use crate::config::Config;
use crate::dom::{Document, NodeId};
use crate::fetch::{FetchOutcome, MenuClient};
use crate::filter::{HIDDEN_CLASS, MenuView, OVERLAY_ID, TOGGLE_ID};
use crate::hash;
use crate::model::MenuDocument;
use crate::render::{Element, render_menu};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

pub const STATIC_MENU_ID: &str = "static-menu";
pub const DYNAMIC_MENU_ID: &str = "dynamic-menu";
pub const LOADING_ID: &str = "menu-loading";
pub const ERROR_ID: &str = "menu-error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

pub const LOADING_MESSAGE: &str = "Loading your menu...";
pub const MISSING_CONFIG_MESSAGE: &str =
    "Personalized menus are not available right now. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str =
    "We couldn't find this menu. Please check that your link is correct.";
pub const SERVER_ERROR_MESSAGE: &str =
    "The menu service is having trouble right now. Please try again later.";
pub const TIMEOUT_MESSAGE: &str =
    "The menu is taking too long to load. Please check your connection and try again.";
pub const NETWORK_MESSAGE: &str =
    "We couldn't load the menu. Please check your internet connection and try again.";

/// Ids of the fixed containers in a page shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    pub static_menu: NodeId,
    pub dynamic_menu: NodeId,
    pub loading: NodeId,
    pub error: NodeId,
    pub error_message: NodeId,
}

impl Shell {
    /// Builds the page shell into `doc`, pre-rendering `static_menu` into the
    /// static container when given.
    pub fn build(doc: &mut Document, static_menu: Option<&MenuDocument>) -> Self {
        let root = doc.root();

        Element::new("button")
            .class("sidebar-toggle")
            .attr("id", TOGGLE_ID)
            .attr("type", "button")
            .attr("aria-label", "Show categories")
            .text("Categories")
            .into_node()
            .mount(doc, root);
        Element::new("div")
            .class("sidebar-overlay")
            .attr("id", OVERLAY_ID)
            .into_node()
            .mount(doc, root);

        let loading = Element::new("div")
            .class("menu-loading")
            .class(HIDDEN_CLASS)
            .attr("id", LOADING_ID)
            .text(LOADING_MESSAGE)
            .into_node()
            .mount(doc, root);

        let error = Element::new("div")
            .class("error-banner")
            .class(HIDDEN_CLASS)
            .attr("id", ERROR_ID)
            .attr("role", "alert")
            .into_node()
            .mount(doc, root);
        let error_message = Element::new("p")
            .class(ERROR_MESSAGE_CLASS)
            .into_node()
            .mount(doc, error);

        let static_container = Element::new("div")
            .class("menu-container")
            .attr("id", STATIC_MENU_ID)
            .into_node()
            .mount(doc, root);
        if let Some(menu) = static_menu {
            render_menu(menu).mount(doc, static_container);
        }

        let dynamic_menu = Element::new("div")
            .class("menu-container")
            .class(HIDDEN_CLASS)
            .attr("id", DYNAMIC_MENU_ID)
            .into_node()
            .mount(doc, root);

        Self {
            static_menu: static_container,
            dynamic_menu,
            loading,
            error,
            error_message,
        }
    }

    fn show_error(&self, doc: &mut Document, message: &str) {
        doc.set_text(self.error_message, message);
        doc.remove_class(self.error, HIDDEN_CLASS);
    }
}

/// Why a personalized menu could not be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadFailure {
    /// A hash was present but no API base address is configured.
    MissingConfig,
    NotFound,
    ServerError(StatusCode),
    TimedOut,
    NetworkFailure,
}

impl LoadFailure {
    /// Text shown in the error banner. Never carries status codes or causes.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadFailure::MissingConfig => MISSING_CONFIG_MESSAGE,
            LoadFailure::NotFound => NOT_FOUND_MESSAGE,
            LoadFailure::ServerError(_) => SERVER_ERROR_MESSAGE,
            LoadFailure::TimedOut => TIMEOUT_MESSAGE,
            LoadFailure::NetworkFailure => NETWORK_MESSAGE,
        }
    }
}

/// Splits a retrieval outcome into the menu or the reason it is missing.
fn split_outcome(outcome: FetchOutcome) -> Result<MenuDocument, LoadFailure> {
    match outcome {
        FetchOutcome::Success(menu) => Ok(menu),
        FetchOutcome::NotFound => Err(LoadFailure::NotFound),
        FetchOutcome::ServerError(status) => Err(LoadFailure::ServerError(status)),
        FetchOutcome::TimedOut => Err(LoadFailure::TimedOut),
        FetchOutcome::NetworkFailure => Err(LoadFailure::NetworkFailure),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuSource {
    /// No identifier in the URL; the pre-rendered menu stays.
    Static,
    /// The personalized menu was fetched and rendered.
    Dynamic { hash: String },
    /// An identifier was present but the menu could not be shown.
    Failed { hash: String, failure: LoadFailure },
}

#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub shell: Shell,
    pub source: MenuSource,
    pub view: MenuView,
}

pub struct PageController {
    config: Config,
    http: Option<reqwest::Client>,
}

impl PageController {
    pub fn new(config: Config) -> Self {
        Self { config, http: None }
    }

    /// Uses `http` for the menu request instead of a default client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Runs one page load for `page_url` against a document built with
    /// [`Shell::build`].
    pub async fn load(&self, doc: &mut Document, shell: Shell, page_url: &str) -> LoadedPage {
        let Some(hash) = hash::extract(page_url) else {
            info!("no menu identifier in URL, showing static menu");
            return self.finish(doc, shell, MenuSource::Static, shell.static_menu);
        };

        let Some(base) = self.config.api_base.clone() else {
            warn!("menu identifier present but no API base address is configured");
            return self.fail(doc, shell, hash, LoadFailure::MissingConfig);
        };

        let client = match &self.http {
            Some(http) => MenuClient::with_http_client(http.clone(), base, self.config.timeout),
            None => match MenuClient::new(base, self.config.timeout) {
                Ok(client) => client,
                Err(e) => {
                    warn!(error = %e, "could not set up menu client");
                    return self.fail(doc, shell, hash, LoadFailure::NetworkFailure);
                }
            },
        };

        doc.add_class(shell.error, HIDDEN_CLASS);
        doc.remove_class(shell.loading, HIDDEN_CLASS);
        let outcome = client.fetch(&hash).await;
        doc.add_class(shell.loading, HIDDEN_CLASS);
        debug!(%outcome, "menu retrieval finished");

        match split_outcome(outcome) {
            Ok(menu) => {
                info!(categories = menu.categories.len(), "personalized menu loaded");
                doc.clear_children(shell.dynamic_menu);
                render_menu(&menu).mount(doc, shell.dynamic_menu);
                doc.add_class(shell.static_menu, HIDDEN_CLASS);
                doc.remove_class(shell.dynamic_menu, HIDDEN_CLASS);
                self.finish(doc, shell, MenuSource::Dynamic { hash }, shell.dynamic_menu)
            }
            Err(failure) => self.fail(doc, shell, hash, failure),
        }
    }

    fn fail(&self, doc: &mut Document, shell: Shell, hash: String, failure: LoadFailure) -> LoadedPage {
        shell.show_error(doc, failure.user_message());
        self.finish(
            doc,
            shell,
            MenuSource::Failed { hash, failure },
            shell.static_menu,
        )
    }

    fn finish(&self, doc: &mut Document, shell: Shell, source: MenuSource, container: NodeId) -> LoadedPage {
        LoadedPage {
            shell,
            source,
            view: MenuView::bind(doc, container, &self.config),
        }
    }
}
