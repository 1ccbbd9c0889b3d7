//! End-to-end slider scenarios against a host document.

use std::cell::RefCell;
use std::rc::Rc;

use rangeslider_core::tooltip::TOOLTIP_VISIBLE_CLASS;
use rangeslider_core::{
    Document, Element, HandleRole, PointerSignal, RangeSlider, Selection, SliderConfig,
    SliderEvent,
};

fn host_document() -> Document {
    let mut doc = Document::new();
    let main = doc.create(Element::new("main").with_class("filters"));
    let slot = doc.create(Element::new("div").with_id("price"));
    doc.append_child(doc.root(), main);
    doc.append_child(main, slot);
    doc
}

fn drag(doc: &mut Document, slider: &mut RangeSlider, handle: HandleRole, path: &[f64]) -> Option<Selection> {
    slider.handle_event(doc, SliderEvent::Pointer { handle, signal: PointerSignal::Down });
    for &value in path {
        slider.handle_event(doc, SliderEvent::Input { handle, value });
    }
    slider.handle_event(doc, SliderEvent::Pointer { handle, signal: PointerSignal::Up });
    slider.handle_event(doc, SliderEvent::Change { handle })
}

#[test]
fn default_configuration_renders_seeded_state() {
    let mut doc = host_document();
    let slider = RangeSlider::mount(&mut doc, "#price", SliderConfig::default());
    let parts = slider.parts().expect("mounted");

    assert_eq!(doc.style(parts.range, "left"), Some("25%"));
    assert_eq!(doc.style(parts.range, "width"), Some("50%"));
    assert_eq!(doc.text(parts.min_tooltip), Some("25"));
    assert_eq!(doc.text(parts.max_tooltip), Some("75"));
    assert_eq!(doc.style(parts.min_tooltip, "left"), Some("calc(25% + (6px))"));
    assert!(!doc.has_class(parts.min_tooltip, TOOLTIP_VISIBLE_CLASS));
    assert!(!doc.has_class(parts.max_tooltip, TOOLTIP_VISIBLE_CLASS));
}

#[test]
fn rendered_structure_matches_class_contract() {
    let mut doc = host_document();
    RangeSlider::mount(&mut doc, "main #price", SliderConfig::default());
    let slot = doc.query_selector("#price").unwrap().unwrap();
    let html = doc.to_html(slot);

    let order = [
        "rs-container",
        "rs-tooltip rs-tooltip-min",
        "rs-tooltip rs-tooltip-max",
        "rs-track",
        "rs-range",
        "rs-input rs-input-min",
        "rs-input rs-input-max",
    ];
    let mut cursor = 0;
    for class in order {
        let needle = format!("class=\"{class}\"");
        let found = html[cursor..]
            .find(&needle)
            .unwrap_or_else(|| panic!("{class} missing or out of order in:\n{html}"));
        cursor += found + needle.len();
    }
    assert!(html.contains("aria-label=\"Minimum Value\""));
    assert!(html.contains("type=\"range\""));
}

#[test]
fn crossing_handles_normalizes_selection_but_not_tooltips() {
    let mut doc = host_document();
    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&commits);
    let mut slider = RangeSlider::builder()
        .on_change(move |low, high| sink.borrow_mut().push((low, high)))
        .mount(&mut doc, "#price");

    let committed = drag(&mut doc, &mut slider, HandleRole::Min, &[50.0, 75.0, 90.0]);
    let parts = slider.parts().unwrap();

    assert_eq!(committed, Some(Selection { low: 75.0, high: 90.0 }));
    assert_eq!(*commits.borrow(), vec![(75.0, 90.0)]);
    assert_eq!(doc.text(parts.min_tooltip), Some("90"));
    assert_eq!(doc.text(parts.max_tooltip), Some("75"));
    assert_eq!(doc.style(parts.range, "left"), Some("75%"));
    assert_eq!(doc.style(parts.range, "width"), Some("15%"));
}

#[test]
fn callback_fires_once_per_commit() {
    let mut doc = host_document();
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    let mut slider = RangeSlider::builder()
        .on_change(move |_, _| *sink.borrow_mut() += 1)
        .mount(&mut doc, "#price");

    drag(&mut doc, &mut slider, HandleRole::Max, &[70.0, 60.0, 55.0, 52.0]);
    assert_eq!(*count.borrow(), 1);
    drag(&mut doc, &mut slider, HandleRole::Min, &[10.0]);
    assert_eq!(*count.borrow(), 2);
    assert_eq!(slider.selection(), Some(Selection { low: 10.0, high: 52.0 }));
}

#[test]
fn tooltip_visible_only_while_dragging() {
    let mut doc = host_document();
    let mut slider = RangeSlider::mount(&mut doc, "#price", SliderConfig::default());
    let parts = slider.parts().unwrap();

    slider.handle_event(
        &mut doc,
        SliderEvent::Pointer { handle: HandleRole::Max, signal: PointerSignal::Down },
    );
    assert!(doc.has_class(parts.max_tooltip, TOOLTIP_VISIBLE_CLASS));
    assert!(!doc.has_class(parts.min_tooltip, TOOLTIP_VISIBLE_CLASS));

    slider.handle_event(
        &mut doc,
        SliderEvent::Pointer { handle: HandleRole::Max, signal: PointerSignal::Leave },
    );
    assert!(doc.has_class(parts.max_tooltip, TOOLTIP_VISIBLE_CLASS));

    slider.handle_event(
        &mut doc,
        SliderEvent::Pointer { handle: HandleRole::Max, signal: PointerSignal::Up },
    );
    assert!(!doc.has_class(parts.max_tooltip, TOOLTIP_VISIBLE_CLASS));
}

#[test]
fn unresolved_mount_leaves_document_untouched() {
    let mut doc = host_document();
    let before = doc.to_html(doc.root());
    let mut slider = RangeSlider::mount(&mut doc, "#does-not-exist", SliderConfig::default());

    assert!(!slider.is_mounted());
    slider.update(&mut doc);
    slider.on_change(|_, _| panic!("detached slider must never commit"));
    assert_eq!(drag(&mut doc, &mut slider, HandleRole::Min, &[40.0]), None);
    assert_eq!(doc.to_html(doc.root()), before);
}

#[test]
fn update_is_idempotent() {
    let mut doc = host_document();
    let mut slider = RangeSlider::mount(&mut doc, "#price", SliderConfig::default());
    let first = doc.to_html(doc.root());
    slider.update(&mut doc);
    slider.update(&mut doc);
    assert_eq!(doc.to_html(doc.root()), first);
}

#[test]
fn custom_domain_and_step() {
    let mut doc = host_document();
    let config = SliderConfig {
        minimum: 100.0,
        maximum: 200.0,
        step: 5.0,
        initial_low: 120.0,
        initial_high: 180.0,
    };
    let mut slider = RangeSlider::mount(&mut doc, "#price", config);
    let parts = slider.parts().unwrap();
    assert_eq!(doc.style(parts.range, "left"), Some("20%"));
    assert_eq!(doc.style(parts.range, "width"), Some("60%"));

    slider.handle_event(
        &mut doc,
        SliderEvent::Input { handle: HandleRole::Max, value: 163.0 },
    );
    assert_eq!(slider.value(HandleRole::Max), Some(165.0));
    assert_eq!(doc.text(parts.max_tooltip), Some("165"));
    assert_eq!(doc.attribute(parts.max_input, "value"), Some("165"));
}
