//! The note being edited: where it is kept, and whether it has unsaved edits.
//!
//! The browser build keeps a single note in `localStorage` ([`LocalStore`]).
//! "Save as" downloads the text as a `.txt` file instead of picking a path.

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url};

/// Somewhere a single note can be read back from and written to.
pub trait NoteStore {
	fn load(&self) -> Option<String>;
	/// Returns whether the text was stored.
	fn save(&mut self, text: &str) -> bool;
}

/// `localStorage` under a fixed key. Without storage every save fails.
pub struct LocalStore {
	storage: Option<Storage>,
	key: String,
}

impl LocalStore {
	pub fn open(key: &str) -> Self {
		let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
		if storage.is_none() {
			warn!("notemood: localStorage unavailable, notes will not persist");
		}
		Self {
			storage,
			key: key.to_string(),
		}
	}
}

impl NoteStore for LocalStore {
	fn load(&self) -> Option<String> {
		self.storage.as_ref()?.get_item(&self.key).ok().flatten()
	}

	fn save(&mut self, text: &str) -> bool {
		let Some(storage) = self.storage.as_ref() else {
			return false;
		};
		match storage.set_item(&self.key, text) {
			Ok(()) => true,
			Err(e) => {
				warn!("notemood: cannot save note: {:?}", e);
				false
			}
		}
	}
}

/// In-memory store, for tests and hosts without storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
	pub text: Option<String>,
	/// When set, every save fails.
	pub read_only: bool,
}

impl NoteStore for MemoryStore {
	fn load(&self) -> Option<String> {
		self.text.clone()
	}

	fn save(&mut self, text: &str) -> bool {
		if self.read_only {
			return false;
		}
		self.text = Some(text.to_string());
		true
	}
}

/// The edited text plus the copy last written to the store.
pub struct Notebook<S> {
	store: S,
	text: String,
	saved: String,
	dirty: bool,
}

impl<S: NoteStore> Notebook<S> {
	/// Open the note kept in `store`, or an empty one.
	pub fn open(store: S) -> Self {
		let text = store.load().unwrap_or_default();
		if !text.is_empty() {
			info!("notemood: restored note ({} characters)", text.chars().count());
		}
		Self {
			store,
			saved: text.clone(),
			text,
			dirty: false,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Edited since the last successful save.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Replace the text. Editing back to the saved copy clears the unsaved mark.
	pub fn edit(&mut self, text: String) {
		self.dirty = text != self.saved;
		self.text = text;
	}

	/// Write the text to the store. The unsaved mark survives a failed save.
	pub fn save(&mut self) -> bool {
		if !self.store.save(&self.text) {
			return false;
		}
		self.saved.clone_from(&self.text);
		self.dirty = false;
		true
	}

	/// Save only when there are unsaved edits. Returns whether anything was written.
	pub fn autosave(&mut self) -> bool {
		self.dirty && self.save()
	}

	/// Start over with an empty note. Unsaved edits are discarded; callers
	/// confirm first when [`is_dirty`](Self::is_dirty).
	pub fn start_new(&mut self) {
		self.text.clear();
		if !self.save() {
			self.saved.clear();
			self.dirty = false;
		}
	}
}

/// Window title: `base` with a trailing `*` while edits are unsaved.
pub fn unsaved_title(base: &str, dirty: bool) -> String {
	if dirty {
		format!("{base}*")
	} else {
		base.to_string()
	}
}

/// File name for "save as": blank names become `note.txt` and `.txt` is appended when missing.
pub fn export_file_name(name: &str) -> String {
	let name = name.trim();
	if name.is_empty() {
		return "note.txt".to_string();
	}
	if name.ends_with(".txt") {
		name.to_string()
	} else {
		format!("{name}.txt")
	}
}

/// Offer `text` as a plain-text download named `file_name`.
pub fn download(file_name: &str, text: &str) -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type("text/plain;charset=utf-8");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)?;
	info!("notemood: downloaded {}", file_name);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stored(text: &str) -> MemoryStore {
		MemoryStore {
			text: Some(text.to_string()),
			read_only: false,
		}
	}

	#[test]
	fn opens_stored_note_clean() {
		let notebook = Notebook::open(stored("hello"));
		assert_eq!(notebook.text(), "hello");
		assert!(!notebook.is_dirty());
		assert_eq!(unsaved_title("NoteMood", notebook.is_dirty()), "NoteMood");
	}

	#[test]
	fn empty_store_opens_empty_note() {
		let notebook = Notebook::open(MemoryStore::default());
		assert_eq!(notebook.text(), "");
		assert!(!notebook.is_dirty());
	}

	#[test]
	fn edits_mark_unsaved_until_saved() {
		let mut notebook = Notebook::open(MemoryStore::default());
		notebook.edit("draft".to_string());
		assert!(notebook.is_dirty());
		assert_eq!(unsaved_title("NoteMood", notebook.is_dirty()), "NoteMood*");

		assert!(notebook.save());
		assert!(!notebook.is_dirty());
		assert_eq!(unsaved_title("NoteMood", notebook.is_dirty()), "NoteMood");
		assert_eq!(notebook.store.text.as_deref(), Some("draft"));
	}

	#[test]
	fn editing_back_to_saved_text_clears_mark() {
		let mut notebook = Notebook::open(stored("abc"));
		notebook.edit("abcd".to_string());
		assert!(notebook.is_dirty());
		notebook.edit("abc".to_string());
		assert!(!notebook.is_dirty());
	}

	#[test]
	fn failed_save_keeps_unsaved_mark() {
		let mut notebook = Notebook::open(MemoryStore {
			text: None,
			read_only: true,
		});
		notebook.edit("lost?".to_string());
		assert!(!notebook.save());
		assert!(notebook.is_dirty());
		assert!(!notebook.autosave());
		assert!(notebook.is_dirty());
	}

	#[test]
	fn autosave_writes_only_dirty_notes() {
		let mut notebook = Notebook::open(stored("same"));
		assert!(!notebook.autosave());

		notebook.edit("changed".to_string());
		assert!(notebook.autosave());
		assert!(!notebook.is_dirty());
		assert_eq!(notebook.store.text.as_deref(), Some("changed"));
		assert!(!notebook.autosave());
	}

	#[test]
	fn start_new_clears_text_and_store() {
		let mut notebook = Notebook::open(stored("old"));
		notebook.edit("old and unsaved".to_string());
		notebook.start_new();
		assert_eq!(notebook.text(), "");
		assert!(!notebook.is_dirty());
		assert_eq!(notebook.store.text.as_deref(), Some(""));
	}

	#[test]
	fn export_names_get_txt_extension() {
		assert_eq!(export_file_name("ideas"), "ideas.txt");
		assert_eq!(export_file_name(" ideas.txt "), "ideas.txt");
		assert_eq!(export_file_name("   "), "note.txt");
		assert_eq!(export_file_name("a.md"), "a.md.txt");
	}
}
