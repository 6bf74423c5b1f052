//! Shared fixtures for unit tests.

use crate::{
    image::paths::{self, gif},
    store::{MemoryStore, PropertyStore},
    variant::TaggedValue,
    Result,
};

/// Store holding the metadata of a single-frame animated GIF
pub fn gif_store() -> MemoryStore {
    let store = MemoryStore::new();
    let entries = [
        (gif::LOGICAL_SCREEN_WIDTH, TaggedValue::u2(320)),
        (gif::LOGICAL_SCREEN_HEIGHT, TaggedValue::u2(240)),
        (gif::GLOBAL_PALETTE_FLAG, TaggedValue::boolean(true)),
        (gif::BACKGROUND_COLOR_INDEX, TaggedValue::u1(3)),
        (gif::APP_EXTENSION, TaggedValue::Ui1Vector(b"NETSCAPE2.0".to_vec())),
        (gif::APP_EXTENSION_DATA, TaggedValue::blob(vec![3, 1, 0, 0, 0])),
        (gif::FRAME_LEFT, TaggedValue::u2(8)),
        (gif::FRAME_WIDTH, TaggedValue::u2(100)),
        (gif::FRAME_HEIGHT, TaggedValue::u2(50)),
        (gif::FRAME_DELAY, TaggedValue::u2(10)),
        (gif::FRAME_DISPOSAL, TaggedValue::u1(2)),
        (gif::TRANSPARENCY_FLAG, TaggedValue::boolean(true)),
        (gif::TRANSPARENT_COLOR_INDEX, TaggedValue::u1(255)),
    ];
    for (path, value) in entries {
        store.insert(path, value).unwrap();
    }
    store
}

/// Store holding JPEG and TIFF orientation tags that disagree
pub fn exif_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(paths::ORIENTATION_JPEG, TaggedValue::u2(6)).unwrap();
    store.insert(paths::ORIENTATION_EXIF, TaggedValue::u2(4)).unwrap();
    store
        .insert(paths::INTEROP_INDEX_JPEG, TaggedValue::narrow_string("R98"))
        .unwrap();
    store
}

/// Store whose every lookup fails with something other than "not found"
pub struct FailingLookupStore;

impl PropertyStore for FailingLookupStore {
    fn lookup(&self, path: &str) -> Result<TaggedValue> {
        Err(store_error!(path, "corrupt entry"))
    }

    fn write(&self, _path: &str, _value: &TaggedValue) -> Result<()> {
        Ok(())
    }

    fn release(&self, value: TaggedValue) {
        panic!("released a value that was never looked up: {value:?}");
    }
}
