pub mod drafts;
pub mod entity_kind;
pub mod form;

pub use drafts::{field_specs, EntityDraft, EntityForm};
pub use entity_kind::{EntityKind, UnknownEntityKind};
pub use form::{
    parse_comma_list, parse_json_list, prefill_values, DraftError, FieldSpec, FieldType,
    FormReader, JsonFieldPolicy, RawForm,
};

use crate::modules::remote_table::application::ports::outgoing::Row;

/// Edit-mode starting values for a stored row of `kind`.
pub fn prefill_form(kind: EntityKind, row: &Row) -> RawForm {
    prefill_values(field_specs(kind), row)
}
