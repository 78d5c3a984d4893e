//! End-to-end animation tests for `etta-rs`

mod formats;
mod runtime;

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use etta_rs::prelude::*;

/// A registry with one texture loaded from `content`.
pub(crate) fn load(content: &str, texture: &str) -> (AnimationRegistry, TextureId) {
	let registry = AnimationRegistry::new();
	let texture = TextureId::from(texture);
	registry.load(content, &texture, &ParseConfig::default()).unwrap();
	(registry, texture)
}

/// Event table with one switchable flag per name.
pub(crate) struct Switches {
	pub(crate) table: EventTable,
	flags: Vec<(&'static str, Arc<AtomicBool>)>,
}

impl Switches {
	pub(crate) fn new(names: &[&'static str]) -> Self {
		let mut table = EventTable::new();
		let mut flags = Vec::new();
		for &name in names {
			let flag = Arc::new(AtomicBool::new(false));
			let probe = Arc::clone(&flag);
			table.register(name, move || probe.load(Ordering::Relaxed));
			flags.push((name, flag));
		}
		Self {
			table,
			flags,
		}
	}

	pub(crate) fn set(&mut self, name: &str, on: bool) {
		for (flag_name, flag) in &self.flags {
			if *flag_name == name {
				flag.store(on, Ordering::Relaxed);
			}
		}
		self.table.refresh();
	}
}
