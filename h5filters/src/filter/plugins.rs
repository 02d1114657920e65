use h5filters_options::filter::{
    bitshuffle::BitshuffleConfiguration, blosc::BloscConfiguration, blosc2::Blosc2Configuration,
    bzip2::Bzip2Configuration, fcidecomp::FciDecompConfiguration, lz4::Lz4Configuration,
    sperr::SperrConfiguration, sz::SzConfiguration, sz3::Sz3Configuration, zfp::ZfpConfiguration,
    zstd::ZstdConfiguration,
};

use super::FilterPlugin;

inventory::submit! { FilterPlugin::new_typed::<BitshuffleConfiguration>() }
inventory::submit! { FilterPlugin::new_typed::<BloscConfiguration>() }
inventory::submit! { FilterPlugin::new_typed::<Blosc2Configuration>() }
inventory::submit! { FilterPlugin::new_typed::<Bzip2Configuration>() }
inventory::submit! { FilterPlugin::new_typed::<FciDecompConfiguration>() }
inventory::submit! { FilterPlugin::new_typed::<Lz4Configuration>() }
inventory::submit! { FilterPlugin::new_typed::<SperrConfiguration>() }
inventory::submit! { FilterPlugin::new_typed::<SzConfiguration>() }
inventory::submit! { FilterPlugin::new_typed::<Sz3Configuration>() }
inventory::submit! { FilterPlugin::new_typed::<ZfpConfiguration>() }
inventory::submit! { FilterPlugin::new_typed::<ZstdConfiguration>() }
