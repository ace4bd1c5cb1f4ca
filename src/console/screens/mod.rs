//! Console screens

pub mod menu;
pub mod resource;

pub use menu::MainMenuScreen;
pub use resource::ResourceScreen;

use std::sync::Arc;

use crate::api::{ApiClient, HttpResourceApi};
use crate::console::traits::Panel;
use crate::i18n::Catalog;
use crate::models::{Application, Company, MasterDataEntry, Record, Resource, User};
use crate::table::{DragSurface, PageSize};

/// What every resource list is built from
#[derive(Clone)]
pub struct PanelContext {
    pub client: ApiClient,
    pub catalog: Catalog,
    pub page_size: PageSize,
    pub surface: Arc<dyn DragSurface>,
}

/// Mount a fresh list for `resource`, starting in the loading state
pub fn open_panel(resource: Resource, context: &PanelContext) -> Box<dyn Panel> {
    match resource {
        Resource::Companies => build::<Company>(resource, context),
        Resource::Applications => build::<Application>(resource, context),
        Resource::Users => build::<User>(resource, context),
        Resource::MasterData => build::<MasterDataEntry>(resource, context),
    }
}

fn build<R: Record>(resource: Resource, context: &PanelContext) -> Box<dyn Panel> {
    let api = HttpResourceApi::<R>::new(context.client.clone());
    Box::new(ResourceScreen::new(
        resource,
        Box::new(api),
        &context.catalog,
        context.page_size,
        Arc::clone(&context.surface),
    ))
}
