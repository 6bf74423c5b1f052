#![no_main]

use libfuzzer_sys::fuzz_target;
use metavariant::{
    codec::{extract, scalar},
    TaggedValue,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let raw_tag = u16::from_le_bytes([data[0], data[1]]);
    let capacity = usize::from(data[2]);
    let Ok(value) = TaggedValue::from_raw_parts(raw_tag, &data[3..]) else {
        return;
    };

    let mut bytes = vec![0u8; capacity];
    assert!(extract(&value, &mut bytes, 256).len() <= capacity);
    let mut signed = vec![0i8; capacity];
    assert!(extract(&value, &mut signed, 256).len() <= capacity);
    let mut wide = vec![0u16; capacity];
    assert!(extract(&value, &mut wide, 256).len() <= capacity.min(256));

    let _ = scalar::read::<bool>(&value, false);
    let _ = scalar::read::<u8>(&value, false);
    let _ = scalar::read::<u16>(&value, false);
    let _ = scalar::read::<f32>(&value, false);
});
