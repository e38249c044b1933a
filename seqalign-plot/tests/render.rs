use seqalign_core::{DiagonalBand, Hit};
use seqalign_plot::{render_hits, DotPlotExporter, ExportConfig, PlotError, Viewport};
use tempfile::tempdir;

fn diagonal_hits(n: usize) -> Vec<Hit> {
    (0..n).map(|i| Hit::new(i * 10, i * 10)).collect()
}

#[test]
fn svg_contains_title_and_points() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.svg");
    let hits = diagonal_hits(5);

    let summary = render_hits(&path, &hits).unwrap();
    assert_eq!(summary.hits, 5);
    assert_eq!(summary.percent_on_diagonal, None);

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("dotplot (5 hits)"));
    assert_eq!(svg.matches("<circle").count(), 5);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn svg_band_title_and_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("band.svg");
    let mut hits = diagonal_hits(3);
    hits.push(Hit::new(0, 90));
    let band = DiagonalBand { slope_upper: 1.0, offset_upper: 5.0, slope_lower: 1.0, offset_lower: -5.0 };

    let exporter = DotPlotExporter::new(ExportConfig::default());
    let summary = exporter
        .export(&path, &hits, &Viewport::for_lengths(100, 100), Some(&band))
        .unwrap();
    assert_eq!(summary.on_diagonal, Some(3));

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("dotplot (4 hits, 75.00000% hits on diagonal)"));
    assert!(svg.contains(r##"stroke="#0000ff""##));
    assert!(svg.contains(r##"stroke="#008000""##));
}

#[test]
fn custom_title_overrides_generated_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("titled.svg");
    let config = ExportConfig { title: Some("human vs mouse <HOXA>".to_string()), ..Default::default() };

    DotPlotExporter::new(config)
        .export(&path, &diagonal_hits(2), &Viewport::for_lengths(50, 50), None)
        .unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("human vs mouse &lt;HOXA&gt;"));
    assert!(!svg.contains("dotplot (2 hits)"));
}

#[test]
fn png_and_jpeg_are_written() {
    let dir = tempdir().unwrap();
    let hits = diagonal_hits(20);
    let band = DiagonalBand::hoxa();
    let config = ExportConfig { width: 200, height: 150, ..Default::default() };
    let exporter = DotPlotExporter::new(config);

    for name in ["plot.png", "plot.jpg", "plot.jpeg"] {
        let path = dir.path().join(name);
        exporter.export(&path, &hits, &Viewport::for_hits(&hits), Some(&band)).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
    }
}

#[test]
fn empty_hits_still_render() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.png");
    let summary = render_hits(&path, &[]).unwrap();
    assert_eq!(summary.hits, 0);
    assert!(path.exists());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.pdf");
    let err = render_hits(&path, &diagonal_hits(1)).unwrap_err();
    assert!(matches!(err, PlotError::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn postscript_has_title_band_and_points() {
    let dir = tempdir().unwrap();
    let hits = diagonal_hits(4);
    let band = DiagonalBand { slope_upper: 1.0, offset_upper: 5.0, slope_lower: 1.0, offset_lower: -5.0 };
    let exporter = DotPlotExporter::new(ExportConfig::default());

    for name in ["plot.ps", "plot.eps"] {
        let path = dir.path().join(name);
        let summary = exporter
            .export(&path, &hits, &Viewport::for_lengths(100, 100), Some(&band))
            .unwrap();
        assert_eq!(summary.on_diagonal, Some(4));

        let ps = std::fs::read_to_string(&path).unwrap();
        assert!(ps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 800 800"));
        assert!(ps.contains("(dotplot \\(4 hits, 100.00000% hits on diagonal\\)) ctext"));
        assert!(ps.contains("(seq1 \\(bp\\)) ctext"));
        assert_eq!(ps.lines().filter(|l| l.ends_with(" d")).count(), 4);
        assert!(ps.lines().filter(|l| l.ends_with(" seg")).count() >= 4);
        assert!(ps.trim_end().ends_with("showpage\n%%EOF"));
    }
}
