// ============================================================================
// WAV to reverberation CSV, end to end
// ============================================================================

use hound::{SampleFormat, WavSpec, WavWriter};
use room_acoustics::read::load_wav_bands;
use room_acoustics::write::write_reverberation_csv;
use room_acoustics::{AnalysisConfigBuilder, reverberation_fits};

#[test]
fn test_octave_etc_wav_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let wav_path = dir.path().join("etc.wav");
    let sample_rate = 4000;
    let n = 8000;

    // Band b decays 60 dB in 0.2 * (b + 1) seconds; the last band is silent
    let rts: Vec<f64> = (0..8).map(|b| 0.2 * (b + 1) as f64).collect();
    let spec = WavSpec {
        channels: 8,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&wav_path, spec).unwrap();
    for i in 0..n {
        for (band, rt) in rts.iter().enumerate() {
            let value = if band == 7 {
                0.0
            } else {
                let k = 6.0 * std::f64::consts::LN_10 / (rt * sample_rate as f64);
                (-k * i as f64).exp()
            };
            writer.write_sample(value as f32).unwrap();
        }
    }
    writer.finalize().unwrap();

    let signal = load_wav_bands(&wav_path).unwrap();
    assert_eq!(signal.n_bands(), 8);
    assert_eq!(signal.len(), n);
    assert_eq!(signal.sample_rate(), sample_rate);

    let config = AnalysisConfigBuilder::new()
        .decay_span_db(20)
        .parallel(true)
        .build()
        .unwrap();
    let fits = reverberation_fits(&signal, &config);
    assert_eq!(fits.len(), 8);
    for (band, fit) in fits.iter().take(7).enumerate() {
        let rt = fit.as_ref().unwrap().rt_seconds;
        assert!(
            (rt - rts[band]).abs() / rts[band] < 0.02,
            "band {}: {} vs {}",
            band,
            rt,
            rts[band]
        );
    }
    assert!(fits[7].is_err());

    let csv_path = dir.path().join("rt.csv");
    write_reverberation_csv(&csv_path, &fits).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 9);
    assert!(text.lines().last().unwrap().starts_with("7,,,,,"));
}
