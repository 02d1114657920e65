use std::collections::HashSet;

use h5filters::{
    options::filter::{
        bitshuffle::{BitshuffleCompressor, BitshuffleConfiguration},
        blosc::{BloscCompressor, BloscConfiguration, BloscShuffle},
        sperr::{SperrConfiguration, SperrMode},
        sz3::Sz3Configuration,
        zfp::ZfpConfiguration,
        zstd::ZstdConfiguration,
    },
    Configuration, FilterCreateError, FilterDescriptor, FilterMetadata,
};

fn descriptor(json: &str) -> Result<FilterDescriptor, FilterCreateError> {
    let metadata: FilterMetadata = serde_json::from_str(json).unwrap();
    FilterDescriptor::from_metadata(&metadata)
}

#[test]
fn blosc_zstd_shuffle() {
    let descriptor = FilterDescriptor::from_configuration(&BloscConfiguration::new(
        BloscCompressor::Zstd,
        5,
        BloscShuffle::Shuffle,
    ))
    .unwrap();
    assert_eq!(descriptor.filter_id(), 32001);
    assert_eq!(descriptor.options(), &[0, 0, 0, 0, 5, 1, 5]);
}

#[test]
fn zfp_reversible() {
    let descriptor = descriptor(r#"{"name": "zfp", "configuration": {"reversible": true}}"#).unwrap();
    assert_eq!(descriptor.options(), &[5, 0, 0, 0, 0, 0]);
    let typed = FilterDescriptor::from_configuration(&ZfpConfiguration {
        reversible: true,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(descriptor, typed);
}

#[test]
fn sperr_rate() {
    let descriptor =
        FilterDescriptor::from_configuration(&SperrConfiguration::from(SperrMode::Rate(16.0)))
            .unwrap();
    assert_eq!(descriptor.filter_id(), 32028);
    assert_eq!(descriptor.options(), &[(16 << 16) | (1 << 28)]);
    assert_eq!(descriptor.options(), &[269_484_032]);
}

#[test]
fn sz3_absolute_and_relative() {
    let error = FilterDescriptor::from_configuration(&Sz3Configuration {
        absolute: Some(0.1),
        relative: Some(0.2),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(error, FilterCreateError::InvalidParameter(_)));
    assert!(matches!(
        descriptor(r#"{"name": "sz3", "configuration": {"absolute": 0.1, "relative": 0.2}}"#),
        Err(FilterCreateError::InvalidParameter(_))
    ));
}

#[test]
fn bitshuffle() {
    assert!(matches!(
        FilterDescriptor::from_configuration(&BitshuffleConfiguration::new(
            7,
            BitshuffleCompressor::LZ4,
            3
        )),
        Err(FilterCreateError::InvalidParameter(_))
    ));
    let descriptor = descriptor(
        r#"{"name": "bshuf", "configuration": {"nelems": 1024, "cname": "zstd", "clevel": 5}}"#,
    )
    .unwrap();
    assert_eq!(descriptor.options(), &[1024, 3, 5]);
}

#[test]
fn unsupported_and_invalid_configuration() {
    assert!(matches!(
        FilterDescriptor::new("gzip", &Configuration::default()),
        Err(FilterCreateError::Unsupported(name)) if name == "gzip"
    ));
    assert!(matches!(
        descriptor(r#"{"name": "zstd", "configuration": {"level": 3}}"#),
        Err(FilterCreateError::ConfigurationInvalid { name: "zstd", .. })
    ));
    assert!(matches!(
        descriptor(r#"{"name": "zstd", "configuration": {"clevel": 23}}"#),
        Err(FilterCreateError::InvalidParameter(_))
    ));
}

#[test]
fn descriptor_equality_and_hash() {
    let a = descriptor(r#"{"name": "zstd"}"#).unwrap();
    let b = FilterDescriptor::from_configuration(&ZstdConfiguration::default()).unwrap();
    let c = FilterDescriptor::from_configuration(&ZstdConfiguration::new(4)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    let set: HashSet<_> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn compression_args() {
    let descriptor = descriptor(r#"{"name": "lz4", "configuration": {"nbytes": 2048}}"#).unwrap();
    let args = descriptor.compression_args();
    assert_eq!(args.compression, 32004);
    assert_eq!(args.compression_opts, vec![2048]);
    assert_eq!(
        serde_json::to_string(&args).unwrap(),
        r#"{"compression":32004,"compression_opts":[2048]}"#
    );
}

#[test]
fn missing_capability_diagnostic() {
    testing_logger::setup();
    let descriptor = descriptor(r#"{"name": "fcidecomp"}"#).unwrap();
    assert!(descriptor.options().is_empty());
    testing_logger::validate(|captured_logs| {
        assert!(captured_logs
            .iter()
            .any(|log| log.level == log::Level::Error && log.body.contains("fcidecomp")));
    });
}
