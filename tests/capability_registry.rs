// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Custom value types dispatched through the encoding capability registry.

use shader_arguments::arguments::{ArgumentDescriptor, DataType, Stage};
use shader_arguments::registry::{EncodeOutcome, EncodingCapability, EncodingRegistry};
use shader_arguments::table::{ArgumentTable, EncodingProxy};
use shader_arguments::values::{ArgumentValue, BufferHandle, SamplerHandle, TextureHandle};
use shader_arguments::{ArgumentsEncoder, EncodeError};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct RecordingTable {
    writes: Vec<(u32, usize, Vec<u8>)>,
}

impl ArgumentTable for RecordingTable {
    fn bind_buffer(&mut self, _index: u32, _buffer: &BufferHandle) {}
    fn bind_texture(&mut self, _index: u32, _texture: &TextureHandle) {}
    fn bind_sampler(&mut self, _index: u32, _sampler: &SamplerHandle) {}
    fn write_bytes(&mut self, index: u32, offset: usize, bytes: &[u8]) {
        self.writes.push((index, offset, bytes.to_vec()));
    }
}

fn seed_argument() -> Vec<ArgumentDescriptor> {
    vec![ArgumentDescriptor::data(
        "seed",
        5,
        Stage::Compute,
        DataType::UInt,
    )]
}

fn seed_values(value: ArgumentValue) -> HashMap<String, ArgumentValue> {
    let mut values = HashMap::new();
    values.insert("seed".to_string(), value);
    values
}

struct Seed(u32);

#[test]
fn unregistered_type_is_unsupported() {
    let registry = EncodingRegistry::new();
    let encoder = ArgumentsEncoder::with_registry(&registry);
    let mut table = RecordingTable::default();
    let err = encoder
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(9))),
            Stage::Compute,
            &mut table,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        EncodeError::UnsupportedValueType { ref argument, type_name }
            if argument == "seed" && type_name.contains("Seed")
    ));
}

#[test]
fn registered_capability_encodes_through_the_proxy() {
    let registry = EncodingRegistry::new();
    registry.register_fn::<Seed, _>(|seed, _argument, proxy| {
        proxy.encode_bytes(&seed.0.to_le_bytes());
        Ok(())
    });
    let encoder = ArgumentsEncoder::with_registry(&registry);
    let mut table = RecordingTable::default();
    encoder
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(9))),
            Stage::Compute,
            &mut table,
        )
        .expect("encode");
    assert_eq!(table.writes, vec![(5, 0, 9u32.to_le_bytes().to_vec())]);
}

#[test]
fn successive_proxy_writes_append() {
    struct Pair(u32, u32);
    let registry = EncodingRegistry::new();
    registry.register_fn::<Pair, _>(|pair, _argument, proxy| {
        proxy.encode_bytes(&pair.0.to_le_bytes());
        proxy.encode_bytes(&pair.1.to_le_bytes());
        Ok(())
    });
    let encoder = ArgumentsEncoder::with_registry(&registry);
    let mut table = RecordingTable::default();
    encoder
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Pair(1, 2))),
            Stage::Compute,
            &mut table,
        )
        .expect("encode");
    assert_eq!(
        table.writes,
        vec![
            (5, 0, 1u32.to_le_bytes().to_vec()),
            (5, 4, 2u32.to_le_bytes().to_vec()),
        ]
    );
}

#[test]
fn last_registration_wins() {
    let registry = EncodingRegistry::new();
    registry.register_fn::<Seed, _>(|_seed, _argument, proxy| {
        proxy.encode_bytes(&0xAAAAAAAAu32.to_le_bytes());
        Ok(())
    });
    registry.register_fn::<Seed, _>(|_seed, _argument, proxy| {
        proxy.encode_bytes(&0xBBBBBBBBu32.to_le_bytes());
        Ok(())
    });
    let encoder = ArgumentsEncoder::with_registry(&registry);
    let mut table = RecordingTable::default();
    encoder
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(0))),
            Stage::Compute,
            &mut table,
        )
        .expect("encode");
    assert_eq!(table.writes, vec![(5, 0, 0xBBBBBBBBu32.to_le_bytes().to_vec())]);
}

#[test]
fn capability_failure_aborts_the_call() {
    struct Broken;
    let registry = EncodingRegistry::new();
    registry.register_fn::<Broken, _>(|_broken, _argument, _proxy| Err("deliberate".into()));
    let encoder = ArgumentsEncoder::with_registry(&registry);

    let arguments = vec![
        ArgumentDescriptor::data("seed", 5, Stage::Compute, DataType::UInt),
        ArgumentDescriptor::data("other", 6, Stage::Compute, DataType::Float),
    ];
    let mut values = seed_values(ArgumentValue::custom(Broken));
    values.insert("other".to_string(), ArgumentValue::data(1.0f32));

    let mut table = RecordingTable::default();
    let err = encoder
        .encode(&arguments, &values, Stage::Compute, &mut table)
        .unwrap_err();
    assert!(matches!(
        err,
        EncodeError::CapabilityFailure { ref argument, .. } if argument == "seed"
    ));
    // Nothing was written for the failed argument, and the later argument
    // was never attempted.
    assert!(table.writes.is_empty());
}

#[test]
fn declining_capability_falls_through_to_unsupported() {
    struct Declines;
    impl EncodingCapability for Declines {
        fn try_encode(
            &self,
            _value: &dyn Any,
            _argument: &ArgumentDescriptor,
            _proxy: &mut EncodingProxy<'_>,
        ) -> EncodeOutcome {
            EncodeOutcome::NotApplicable
        }
    }
    let registry = EncodingRegistry::new();
    registry.register::<Seed>(Arc::new(Declines));
    let encoder = ArgumentsEncoder::with_registry(&registry);
    let mut table = RecordingTable::default();
    let err = encoder
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(3))),
            Stage::Compute,
            &mut table,
        )
        .unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedValueType { .. }));
}

#[test]
fn registries_are_independent() {
    let with_capability = EncodingRegistry::new();
    with_capability.register_fn::<Seed, _>(|seed, _argument, proxy| {
        proxy.encode_bytes(&seed.0.to_le_bytes());
        Ok(())
    });
    let empty = EncodingRegistry::new();

    let mut table = RecordingTable::default();
    ArgumentsEncoder::with_registry(&with_capability)
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(4))),
            Stage::Compute,
            &mut table,
        )
        .expect("encode");

    let err = ArgumentsEncoder::with_registry(&empty)
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(4))),
            Stage::Compute,
            &mut table,
        )
        .unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedValueType { .. }));
}

#[test]
fn unregister_removes_the_capability() {
    let registry = EncodingRegistry::new();
    registry.register_fn::<Seed, _>(|seed, _argument, proxy| {
        proxy.encode_bytes(&seed.0.to_le_bytes());
        Ok(())
    });
    registry.unregister::<Seed>();
    let encoder = ArgumentsEncoder::with_registry(&registry);
    let mut table = RecordingTable::default();
    let err = encoder
        .encode(
            &seed_argument(),
            &seed_values(ArgumentValue::custom(Seed(1))),
            Stage::Compute,
            &mut table,
        )
        .unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedValueType { .. }));
}

#[test]
fn global_registry_serves_the_default_encoder() {
    // A type unique to this test keeps the process-wide registry clean for
    // everything else.
    struct GlobalToken(u16);
    EncodingRegistry::global().register_fn::<GlobalToken, _>(|token, _argument, proxy| {
        proxy.encode_bytes(&token.0.to_le_bytes());
        proxy.encode_bytes(&[0, 0]);
        Ok(())
    });
    let arguments = vec![ArgumentDescriptor::data(
        "token",
        0,
        Stage::Vertex,
        DataType::UInt,
    )];
    let mut values = HashMap::new();
    values.insert(
        "token".to_string(),
        ArgumentValue::custom(GlobalToken(0x1234)),
    );
    let mut table = RecordingTable::default();
    shader_arguments::encode(&arguments, &values, Stage::Vertex, &mut table).expect("encode");
    assert_eq!(table.writes.len(), 2);
    assert_eq!(table.writes[0], (0, 0, 0x1234u16.to_le_bytes().to_vec()));
}
