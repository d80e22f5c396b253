//! Resolution of a unit's display fields into page handles.
//!
//! Each kind of unit declares its fields as an enum implementing [`FieldKey`].
//! Binding resolves every declared field up front, so a bound
//! [`WidgetBinder`] can hand out handles without any further failure case.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::renderer::page::{Page, WidgetHandle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("{kind} {index}: element '{id}' is missing from the page")]
    MissingElement {
        kind: &'static str,
        index: usize,
        id: String,
    },

    #[error("element id '{0}' is used more than once")]
    DuplicateElement(String),
}

pub trait FieldKey: Copy + Eq + Hash + Debug + 'static {
    /// Name of the unit kind, for diagnostics.
    const KIND: &'static str;

    /// Every field a unit of this kind must have.
    fn fields() -> &'static [Self];

    /// Page id of this field for the unit at `index`.
    fn element_id(self, index: usize) -> String;
}

/// Element id following the `<prefix><index>-<field>` convention.
pub fn group_element_id(prefix: &str, index: usize, field: &str) -> String {
    format!("{prefix}{index}-{field}")
}

#[derive(Debug, Clone)]
pub struct WidgetBinder<F: FieldKey> {
    index: usize,
    handles: IndexMap<F, WidgetHandle>,
}

impl<F: FieldKey> WidgetBinder<F> {
    pub fn bind(page: &Page, index: usize) -> Result<Self, BindError> {
        let mut handles = IndexMap::with_capacity(F::fields().len());
        for field in F::fields() {
            let id = field.element_id(index);
            let handle = page.lookup(&id).ok_or_else(|| BindError::MissingElement {
                kind: F::KIND,
                index,
                id: id.clone(),
            })?;
            trace!("Bound {} {} {:?} to '{}'", F::KIND, index, field, id);
            handles.insert(*field, handle);
        }
        Ok(Self { index, handles })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn handle(&self, field: F) -> WidgetHandle {
        // Every declared field was resolved in `bind`.
        self.handles[&field]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::page::ElementSpec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum PumpLike {
        Flow,
        Trip,
    }

    impl FieldKey for PumpLike {
        const KIND: &'static str = "pump";

        fn fields() -> &'static [Self] {
            &[PumpLike::Flow, PumpLike::Trip]
        }

        fn element_id(self, index: usize) -> String {
            let field = match self {
                PumpLike::Flow => "flow",
                PumpLike::Trip => "trip",
            };
            group_element_id("p", index, field)
        }
    }

    #[test]
    fn test_bind_resolves_every_field() {
        let mut page = Page::new();
        page.push_row("", vec![ElementSpec::text("p0-flow"), ElementSpec::status("p0-trip")])
            .unwrap();

        let binder = WidgetBinder::<PumpLike>::bind(&page, 0).unwrap();
        assert_eq!(binder.index(), 0);
        assert_eq!(page.element(binder.handle(PumpLike::Flow)).id(), "p0-flow");
        assert_eq!(page.element(binder.handle(PumpLike::Trip)).id(), "p0-trip");
    }

    #[test]
    fn test_missing_field_fails_construction() {
        let mut page = Page::new();
        page.push_row("", vec![ElementSpec::text("p1-flow")]).unwrap();

        let err = WidgetBinder::<PumpLike>::bind(&page, 1).unwrap_err();
        assert_eq!(
            err,
            BindError::MissingElement {
                kind: "pump",
                index: 1,
                id: "p1-trip".to_string()
            }
        );
    }

    #[test]
    fn test_group_element_id() {
        assert_eq!(group_element_id("tmp", 10, "set"), "tmp10-set");
    }
}
