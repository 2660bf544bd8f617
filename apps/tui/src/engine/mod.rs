pub mod entities;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod notification;
pub mod picker;
pub mod reconciler;
pub mod selection;
pub mod store;
pub mod view;

pub use error::EngineError;
pub use filter::{build_view, SearchState};
pub use highlight::{Highlighted, Segment};
pub use notification::{Notification, NotificationKind};
pub use picker::PickerOption;
pub use reconciler::MappingContext;
pub use selection::Selection;
pub use store::{RecentMapping, Store};
pub use view::{ItemRow, MappingRow, MappingTarget, Pane, PaneCounts, TabView};

#[cfg(test)]
pub(crate) mod testing {
    use crate::api::Tables;
    use crate::catalog::{Catalog, CatalogSlice, SliceData};
    use serde_json::Value;

    /// The demo tables as the catalog endpoint would list them
    pub fn demo_catalog() -> Catalog {
        let mut tables = Tables::demo();
        let mut catalog = Catalog::default();
        for slice in CatalogSlice::ALL {
            let envelope = tables
                .apply(slice.action(), &Value::Null)
                .expect("demo tables answer every listing");
            let data = SliceData::decode(slice, envelope.data.unwrap_or_default())
                .expect("demo rows decode");
            catalog.replace(data);
        }
        catalog
    }
}
