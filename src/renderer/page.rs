//! The rendering target: an ordered store of display elements addressed by
//! their page-unique id, grouped into sections for export.
//!
//! Every mutation counts as one write on the element it touches. Callers are
//! expected to go through the presenter in [`crate::renderer::widgets`], which
//! suppresses writes that would not change anything.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::renderer::colours::{ButtonClass, StatusColour};
use crate::sensors::binder::BindError;

/// Opaque reference to one element of a [`Page`]. Only the page that issued it
/// can resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Plain text, optionally followed by a fixed unit.
    Text,
    /// A cell whose background colour carries the state.
    Status,
    Button,
    /// A text input; the dashboard only ever writes its placeholder.
    Input,
}

/// Declaration of one element when laying out the page.
#[derive(Debug, Clone)]
pub struct ElementSpec {
    id: String,
    kind: ElementKind,
    text: String,
    unit: &'static str,
    background: Option<StatusColour>,
    button: Option<ButtonClass>,
}

impl ElementSpec {
    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text)
    }

    pub fn status(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Status)
    }

    pub fn button(id: impl Into<String>, label: &str) -> Self {
        Self::new(id, ElementKind::Button).with_text(label)
    }

    pub fn input(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Input)
    }

    fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            text: String::new(),
            unit: "",
            background: None,
            button: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_background(mut self, colour: StatusColour) -> Self {
        self.background = Some(colour);
        self
    }

    pub fn with_class(mut self, class: ButtonClass) -> Self {
        self.button = Some(class);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    id: String,
    kind: ElementKind,
    text: String,
    unit: &'static str,
    background: Option<StatusColour>,
    button: Option<ButtonClass>,
    placeholder: String,
    writes: u64,
}

impl Element {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn background(&self) -> Option<StatusColour> {
        self.background
    }

    pub fn button(&self) -> Option<ButtonClass> {
        self.button
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of writes this element has received since the page was built.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

#[derive(Debug, Clone)]
struct Row {
    label: String,
    cells: Vec<WidgetHandle>,
}

#[derive(Debug, Clone)]
struct Section {
    title: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Element>,
    ids: HashMap<String, WidgetHandle>,
    sections: Vec<Section>,
    writes: u64,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_section(&mut self, title: impl Into<String>, columns: &[&str]) {
        self.sections.push(Section {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        });
    }

    /// Append a row to the last section. Element ids must be unique per page.
    pub fn push_row(&mut self, label: impl Into<String>, cells: Vec<ElementSpec>) -> Result<(), BindError> {
        // Check the whole row first so a rejected row leaves nothing behind.
        for (i, spec) in cells.iter().enumerate() {
            if self.ids.contains_key(&spec.id) || cells[..i].iter().any(|other| other.id == spec.id) {
                return Err(BindError::DuplicateElement(spec.id.clone()));
            }
        }

        let mut handles = Vec::with_capacity(cells.len());
        for spec in cells {
            let handle = WidgetHandle(self.elements.len());
            self.ids.insert(spec.id.clone(), handle);
            self.elements.push(Element {
                id: spec.id,
                kind: spec.kind,
                text: spec.text,
                unit: spec.unit,
                background: spec.background,
                button: spec.button,
                placeholder: String::new(),
                writes: 0,
            });
            handles.push(handle);
        }

        if self.sections.is_empty() {
            self.push_section("", &[]);
        }
        if let Some(section) = self.sections.last_mut() {
            section.rows.push(Row {
                label: label.into(),
                cells: handles,
            });
        }
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Option<WidgetHandle> {
        self.ids.get(id).copied()
    }

    pub fn element(&self, handle: WidgetHandle) -> &Element {
        &self.elements[handle.0]
    }

    /// Convenience for tests and readouts: the element with the given id.
    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.lookup(id).map(|handle| self.element(handle))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of writes across all elements.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn write_text(&mut self, handle: WidgetHandle, text: &str) {
        self.touch(handle).text = text.to_string();
    }

    pub fn write_background(&mut self, handle: WidgetHandle, colour: StatusColour) {
        self.touch(handle).background = Some(colour);
    }

    pub fn write_status(&mut self, handle: WidgetHandle, colour: StatusColour, text: &str) {
        let element = self.touch(handle);
        element.background = Some(colour);
        element.text = text.to_string();
    }

    pub fn write_button(&mut self, handle: WidgetHandle, class: ButtonClass, label: &str) {
        let element = self.touch(handle);
        element.button = Some(class);
        element.text = label.to_string();
    }

    pub fn write_placeholder(&mut self, handle: WidgetHandle, placeholder: &str) {
        self.touch(handle).placeholder = placeholder.to_string();
    }

    fn touch(&mut self, handle: WidgetHandle) -> &mut Element {
        self.writes += 1;
        let element = &mut self.elements[handle.0];
        element.writes += 1;
        element
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>LPD Power</title>\n</head>\n<body>\n",
        );

        for section in &self.sections {
            let _ = writeln!(html, "<h4>{}</h4>", escape(&section.title));
            html.push_str("<table class=\"table table-striped\">\n");
            if !section.columns.is_empty() {
                html.push_str("<thead><tr>");
                for column in &section.columns {
                    let _ = write!(html, "<th class=\"text-center\">{}</th>", escape(column));
                }
                html.push_str("</tr></thead>\n");
            }
            html.push_str("<tbody>\n");
            for row in &section.rows {
                html.push_str("<tr>");
                if !row.label.is_empty() {
                    let _ = write!(html, "<th scope=\"row\">{}</th>", escape(&row.label));
                }
                for handle in &row.cells {
                    let _ = write!(html, "<td>{}</td>", element_html(self.element(*handle)));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</tbody>\n</table>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    /// Plain-text readout of every section, one row per line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for section in &self.sections {
            let _ = writeln!(text, "== {} ==", section.title);
            for row in &section.rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|handle| element_text(self.element(*handle)))
                    .collect();
                if row.label.is_empty() {
                    let _ = writeln!(text, "  {}", cells.join("  "));
                } else {
                    let _ = writeln!(text, "  {}: {}", row.label, cells.join("  "));
                }
            }
        }
        text
    }
}

fn element_html(element: &Element) -> String {
    let id = escape(&element.id);
    match element.kind {
        ElementKind::Text => format!(
            "<span id=\"{id}\">{}</span>{}",
            escape(&element.text),
            escape(element.unit)
        ),
        ElementKind::Status => {
            let style = element
                .background
                .map(|colour| format!(" style=\"background-color:{}\"", colour.hex()))
                .unwrap_or_default();
            format!(
                "<div id=\"{id}\" class=\"status\"{style}>{}</div>",
                escape(&element.text)
            )
        }
        ElementKind::Button => {
            let class = element.button.map(ButtonClass::css).unwrap_or("btn-default");
            format!(
                "<button id=\"{id}\" type=\"button\" class=\"btn {class}\">{}</button>",
                escape(&element.text)
            )
        }
        ElementKind::Input => format!(
            "<input id=\"{id}\" class=\"form-control\" type=\"text\" placeholder=\"{}\">{}",
            escape(&element.placeholder),
            escape(element.unit)
        ),
    }
}

fn element_text(element: &Element) -> String {
    match element.kind {
        ElementKind::Text => format!("{}{}", element.text, element.unit),
        ElementKind::Status => {
            let colour = element.background.unwrap_or(StatusColour::Unknown);
            if element.text.is_empty() {
                format!("[{colour}]")
            } else {
                format!("{} [{colour}]", element.text)
            }
        }
        ElementKind::Button => format!("<{}>", element.text),
        ElementKind::Input => format!("({}){}", element.placeholder, element.unit),
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        let mut page = Page::new();
        page.push_section("Pump", &["Flow", "Tripped"]);
        page.push_row(
            "Pump 1",
            vec![
                ElementSpec::text("p0-flow").with_text("0").with_unit("l/min"),
                ElementSpec::status("p0-trip"),
            ],
        )
        .unwrap();
        page
    }

    #[test]
    fn test_lookup_and_initial_state() {
        let page = sample_page();
        assert_eq!(page.len(), 2);

        let flow = page.by_id("p0-flow").unwrap();
        assert_eq!(flow.kind(), ElementKind::Text);
        assert_eq!(flow.text(), "0");
        assert_eq!(flow.writes(), 0);
        assert!(page.lookup("p1-flow").is_none());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut page = sample_page();
        let err = page
            .push_row("again", vec![ElementSpec::status("p0-trip")])
            .unwrap_err();
        assert!(matches!(err, BindError::DuplicateElement(id) if id == "p0-trip"));
    }

    #[test]
    fn test_rejected_row_adds_nothing() {
        let mut page = sample_page();

        let err = page
            .push_row("mixed", vec![ElementSpec::text("p0-new"), ElementSpec::status("p0-trip")])
            .unwrap_err();
        assert_eq!(err, BindError::DuplicateElement("p0-trip".to_string()));
        assert!(page.lookup("p0-new").is_none());
        assert_eq!(page.len(), 2);
        assert_eq!(page.to_text(), "== Pump ==\n  Pump 1: 0l/min  [unknown]\n");

        let err = page
            .push_row("twice", vec![ElementSpec::text("p1-flow"), ElementSpec::text("p1-flow")])
            .unwrap_err();
        assert_eq!(err, BindError::DuplicateElement("p1-flow".to_string()));
        assert!(page.lookup("p1-flow").is_none());
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_every_write_is_counted() {
        let mut page = sample_page();
        let trip = page.lookup("p0-trip").unwrap();

        page.write_status(trip, StatusColour::Ok, "");
        page.write_background(trip, StatusColour::Ok);

        assert_eq!(page.element(trip).writes(), 2);
        assert_eq!(page.writes(), 2);
    }

    #[test]
    fn test_html_export() {
        let mut page = sample_page();
        let flow = page.lookup("p0-flow").unwrap();
        let trip = page.lookup("p0-trip").unwrap();
        page.write_text(flow, "5.6");
        page.write_background(trip, StatusColour::Fail);

        let html = page.to_html();
        assert!(html.contains("<h4>Pump</h4>"));
        assert!(html.contains("<span id=\"p0-flow\">5.6</span>l/min"));
        assert!(html.contains("<div id=\"p0-trip\" class=\"status\" style=\"background-color:#d9534f\"></div>"));
    }

    #[test]
    fn test_text_readout() {
        let mut page = sample_page();
        let trip = page.lookup("p0-trip").unwrap();
        page.write_status(trip, StatusColour::Ok, "OK");

        assert_eq!(page.to_text(), "== Pump ==\n  Pump 1: 0l/min  OK [ok]\n");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
