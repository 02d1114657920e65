use h5filters::{
    config::global_config_mut, options::filter::zstd::ZstdConfiguration, FilterDescriptor,
};

#[test]
fn descriptor_creation_registers_filters() {
    let directory = std::env::temp_dir().join("h5filters-descriptor-registration-test");
    global_config_mut()
        .set_plugin_path(&directory)
        .set_hdf5_library(directory.join("libhdf5_missing.so"));

    testing_logger::setup();
    let descriptor = FilterDescriptor::from_configuration(&ZstdConfiguration::default()).unwrap();
    assert_eq!(descriptor.options(), &[3]);
    testing_logger::validate(|captured_logs| {
        assert!(captured_logs.iter().any(|log| log.level == log::Level::Error
            && log.body.contains("filters cannot be registered")));
    });

    // registration is attempted once
    testing_logger::setup();
    FilterDescriptor::from_configuration(&ZstdConfiguration::default()).unwrap();
    testing_logger::validate(|captured_logs| {
        assert!(!captured_logs
            .iter()
            .any(|log| log.body.contains("filters cannot be registered")));
    });
}
