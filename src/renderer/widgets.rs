//! Status presentation with change suppression.
//!
//! Each function compares the requested state with what the element already
//! shows and only writes to the page when they differ. The return value says
//! whether a write happened.

use crate::renderer::colours::{ButtonClass, StatusColour};
use crate::renderer::page::{Page, WidgetHandle};

/// Two-state box: ok/fail background plus a label.
pub fn apply_status_box(
    page: &mut Page,
    handle: WidgetHandle,
    value: bool,
    text_true: &str,
    text_false: &str,
) -> bool {
    let colour = StatusColour::from_ok(value);
    let text = if value { text_true } else { text_false };
    apply_labelled_colour(page, handle, colour, text)
}

/// Box with an explicit colour, used for the three-state indicators.
pub fn apply_labelled_colour(page: &mut Page, handle: WidgetHandle, colour: StatusColour, text: &str) -> bool {
    let element = page.element(handle);
    if element.background() == Some(colour) && element.text() == text {
        return false;
    }
    page.write_status(handle, colour, text);
    true
}

/// Toggle button. The label names the action a click would take, so an
/// enabled channel reads "Disable".
pub fn apply_button_state(
    page: &mut Page,
    handle: WidgetHandle,
    value: bool,
    label_true: &str,
    label_false: &str,
) -> bool {
    let class = ButtonClass::from_state(value);
    let label = if value { label_true } else { label_false };
    let element = page.element(handle);
    if element.button() == Some(class) && element.text() == label {
        return false;
    }
    page.write_button(handle, class, label);
    true
}

/// Colour-only indicator with ok/fail semantics.
pub fn apply_indicator(page: &mut Page, handle: WidgetHandle, ok: bool) -> bool {
    apply_level(page, handle, StatusColour::from_ok(ok))
}

/// Colour-only indicator with an arbitrary level (ok/warn/fail).
pub fn apply_level(page: &mut Page, handle: WidgetHandle, colour: StatusColour) -> bool {
    if page.element(handle).background() == Some(colour) {
        return false;
    }
    page.write_background(handle, colour);
    true
}

/// Three-state enable indicator: warn while the sensor is administratively
/// disabled, ok otherwise.
pub fn apply_enablement(page: &mut Page, handle: WidgetHandle, disabled: bool) -> bool {
    let colour = if disabled {
        StatusColour::Warn
    } else {
        StatusColour::Ok
    };
    apply_level(page, handle, colour)
}

pub fn apply_text(page: &mut Page, handle: WidgetHandle, text: &str) -> bool {
    if page.element(handle).text() == text {
        return false;
    }
    page.write_text(handle, text);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::page::ElementSpec;

    fn page_with(specs: Vec<ElementSpec>) -> Page {
        let mut page = Page::new();
        page.push_section("test", &[]);
        page.push_row("", specs).unwrap();
        page
    }

    #[test]
    fn test_status_box_writes_once_per_change() {
        let mut page = page_with(vec![ElementSpec::status("overall-status")]);
        let handle = page.lookup("overall-status").unwrap();

        assert!(apply_status_box(&mut page, handle, true, "Healthy", "Error"));
        assert!(!apply_status_box(&mut page, handle, true, "Healthy", "Error"));
        assert!(apply_status_box(&mut page, handle, false, "Healthy", "Error"));

        let element = page.element(handle);
        assert_eq!(element.writes(), 2);
        assert_eq!(element.text(), "Error");
        assert_eq!(element.background(), Some(StatusColour::Fail));
    }

    #[test]
    fn test_button_label_names_the_action() {
        let mut page = page_with(vec![ElementSpec::button("q0-btn0", "Disable").with_class(ButtonClass::On)]);
        let handle = page.lookup("q0-btn0").unwrap();

        // Already showing the enabled appearance.
        assert!(!apply_button_state(&mut page, handle, true, "Disable", "Enable"));

        assert!(apply_button_state(&mut page, handle, false, "Disable", "Enable"));
        let element = page.element(handle);
        assert_eq!(element.button(), Some(ButtonClass::Off));
        assert_eq!(element.text(), "Enable");
        assert_eq!(element.writes(), 1);
    }

    #[test]
    fn test_enablement_is_three_state() {
        let mut page = page_with(vec![ElementSpec::status("tmp0-enable")]);
        let handle = page.lookup("tmp0-enable").unwrap();

        apply_enablement(&mut page, handle, true);
        assert_eq!(page.element(handle).background(), Some(StatusColour::Warn));

        apply_enablement(&mut page, handle, false);
        assert_eq!(page.element(handle).background(), Some(StatusColour::Ok));

        apply_level(&mut page, handle, StatusColour::Fail);
        assert_eq!(page.element(handle).background(), Some(StatusColour::Fail));
        assert_eq!(page.element(handle).writes(), 3);
    }

    #[test]
    fn test_unchanged_fields_are_not_rewritten() {
        let mut page = page_with(vec![
            ElementSpec::status("a"),
            ElementSpec::status("b"),
            ElementSpec::text("c"),
        ]);
        let a = page.lookup("a").unwrap();
        let b = page.lookup("b").unwrap();
        let c = page.lookup("c").unwrap();

        apply_indicator(&mut page, a, true);
        apply_indicator(&mut page, b, true);
        apply_text(&mut page, c, "1.0");
        let before = page.writes();

        apply_indicator(&mut page, a, true);
        apply_indicator(&mut page, b, false);
        apply_text(&mut page, c, "1.0");

        assert_eq!(page.writes() - before, 1);
        assert_eq!(page.element(b).writes(), 2);
    }
}
