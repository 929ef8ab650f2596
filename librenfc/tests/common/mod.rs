// Shared helpers for the integration tests.
#![allow(dead_code)]


use std::sync::{Arc, Mutex};

use librenfc::session::{ScanEvent, ScanObserver, ScanPhase};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Observer collecting every event of a scan.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<ScanEvent>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<ScanPhase> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ScanEvent::PhaseChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }

    pub fn retries(&self, phase: ScanPhase) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ScanEvent::Retrying { phase: p, .. } if *p == phase))
            .count()
    }
}

impl ScanObserver for Recorder {
    fn on_event(&self, event: &ScanEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
