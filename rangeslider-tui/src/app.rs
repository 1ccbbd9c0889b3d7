//! Application state — single-owner, main-thread only.
//!
//! The host document, the slider mounted into it, and the bits of pointer
//! bookkeeping the terminal needs. Commits arrive from the slider callback
//! over a channel and are drained once per frame.

use std::sync::mpsc::{self, Receiver};

use rangeslider_core::geometry::format_value;
use rangeslider_core::{Document, Element, HandleRole, RangeSlider, Selection, SliderEvent};

use crate::config::HostConfig;
use crate::ui::UiLayout;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Build the host page: `body > main.rs-host > section#range.rs-slot`.
pub fn host_document() -> Document {
    let mut doc = Document::new();
    let main = doc.create(Element::new("main").with_class("rs-host"));
    let slot = doc.create(Element::new("section").with_id("range").with_class("rs-slot"));
    doc.append_child(doc.root(), main);
    doc.append_child(main, slot);
    doc
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub label: String,

    // Slider
    pub document: Document,
    pub slider: RangeSlider,
    pub focused: HandleRole,

    // Pointer tracking
    pub drag: Option<HandleRole>,
    pub pointer_inside: bool,
    /// Areas from the last frame, used to hit-test mouse events.
    pub layout: Option<UiLayout>,

    // Commits
    pub commit_rx: Receiver<Selection>,
    pub last_commit: Option<Selection>,
    pub commit_count: usize,

    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(config: &HostConfig) -> Self {
        let mut document = host_document();
        let (commit_tx, commit_rx) = mpsc::channel();
        let slider = RangeSlider::builder()
            .config(config.slider.clone())
            .on_change(move |low, high| {
                let _ = commit_tx.send(Selection { low, high });
            })
            .mount(&mut document, config.mount.as_str());

        let mut app = Self {
            running: true,
            label: config.label.clone(),
            document,
            slider,
            focused: HandleRole::Min,
            drag: None,
            pointer_inside: false,
            layout: None,
            commit_rx,
            last_commit: None,
            commit_count: 0,
            status_message: None,
        };
        if !app.slider.is_mounted() {
            app.set_error(format!(
                "No element found with the selector \"{}\"",
                config.mount
            ));
        }
        app
    }

    /// Deliver a signal to the slider.
    pub fn dispatch(&mut self, event: SliderEvent) -> Option<Selection> {
        self.slider.handle_event(&mut self.document, event)
    }

    /// Pull committed selections forwarded by the slider callback.
    pub fn drain_commits(&mut self) {
        while let Ok(selection) = self.commit_rx.try_recv() {
            self.last_commit = Some(selection);
            self.commit_count += 1;
            self.set_status(format!(
                "Committed {} – {}",
                format_value(selection.low),
                format_value(selection.high)
            ));
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Set an error status message.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
