use fusen_core::offset::BASE_OFFSET_BUFFER;
use fusen_core::{base_offset, CandidatePosition, ChromeCandidate};

fn fixed_header(height: f64) -> ChromeCandidate {
    ChromeCandidate {
        position: CandidatePosition::Fixed,
        rect_top: 0.0,
        width: 1280.0,
        height,
        declared_top: Some(0.0),
    }
}

#[test]
fn no_chrome_yields_zero() {
    assert_eq!(base_offset(&[], &[]), 0.0);
}

#[test]
fn fixed_header_at_top_clears_its_height() {
    let header = fixed_header(64.0);
    let offset = base_offset(&[header], &[]);
    assert!(offset >= 64.0);
    assert_eq!(offset, 64.0 + BASE_OFFSET_BUFFER);
}

#[test]
fn tallest_edge_wins() {
    let short = fixed_header(40.0);
    let tall = ChromeCandidate {
        position: CandidatePosition::Sticky,
        rect_top: 12.0,
        width: 900.0,
        height: 70.0,
        declared_top: Some(0.0),
    };
    assert_eq!(base_offset(&[short, tall], &[]), 82.0 + BASE_OFFSET_BUFFER);
}

#[test]
fn statically_positioned_chrome_is_ignored() {
    let banner = ChromeCandidate {
        position: CandidatePosition::Other,
        rect_top: 0.0,
        width: 1280.0,
        height: 120.0,
        declared_top: None,
    };
    assert_eq!(base_offset(&[banner], &[]), 0.0);
}

#[test]
fn zero_sized_or_offscreen_chrome_is_ignored() {
    let collapsed = ChromeCandidate {
        position: CandidatePosition::Fixed,
        rect_top: 0.0,
        width: 1280.0,
        height: 0.0,
        declared_top: Some(0.0),
    };
    let far_down = ChromeCandidate {
        position: CandidatePosition::Fixed,
        rect_top: 400.0,
        width: 1280.0,
        height: 50.0,
        declared_top: Some(0.0),
    };
    assert_eq!(base_offset(&[collapsed, far_down], &[]), 0.0);
}

#[test]
fn fallback_scan_is_used_only_without_primary_matches() {
    let fallback = fixed_header(30.0);
    assert_eq!(base_offset(&[], &[fallback]), 30.0 + BASE_OFFSET_BUFFER);

    let primary = fixed_header(50.0);
    let taller_fallback = fixed_header(90.0);
    assert_eq!(
        base_offset(&[primary], &[taller_fallback]),
        50.0 + BASE_OFFSET_BUFFER
    );
}

#[test]
fn fallback_requires_declared_top_near_zero() {
    let drawer = ChromeCandidate {
        position: CandidatePosition::Fixed,
        rect_top: 0.0,
        width: 320.0,
        height: 600.0,
        declared_top: Some(80.0),
    };
    assert_eq!(base_offset(&[], &[drawer]), 0.0);

    let banner = ChromeCandidate {
        declared_top: Some(-8.0),
        ..drawer
    };
    assert!(base_offset(&[], &[banner]) > 0.0);
}

#[test]
fn sticky_header_scrolled_past_top_still_counts() {
    let bar = ChromeCandidate {
        position: CandidatePosition::Sticky,
        rect_top: -20.0,
        width: 1280.0,
        height: 56.0,
        declared_top: Some(0.0),
    };
    assert_eq!(base_offset(&[bar], &[]), 36.0 + BASE_OFFSET_BUFFER);
}
