use axum::Json;
use dracin_source_prelude::{SourceDescriptor, DESCRIPTORS};

pub async fn handler() -> Json<&'static [SourceDescriptor]> {
    Json(DESCRIPTORS.as_slice())
}
