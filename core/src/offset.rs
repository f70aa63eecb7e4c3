pub const NEAR_TOP_LIMIT: f64 = 100.0;
pub const DECLARED_TOP_WINDOW: f64 = 10.0;
pub const BASE_OFFSET_BUFFER: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidatePosition {
    Fixed,
    Sticky,
    Other,
}

#[derive(Clone, Copy, Debug)]
pub struct ChromeCandidate {
    pub position: CandidatePosition,
    pub rect_top: f64,
    pub width: f64,
    pub height: f64,
    pub declared_top: Option<f64>,
}

impl ChromeCandidate {
    fn anchored_near_top(&self) -> bool {
        matches!(
            self.position,
            CandidatePosition::Fixed | CandidatePosition::Sticky
        ) && self.rect_top <= NEAR_TOP_LIMIT
            && self.height > 0.0
            && self.width > 0.0
    }

    fn declared_top_near_zero(&self) -> bool {
        self.declared_top.unwrap_or(0.0).abs() <= DECLARED_TOP_WINDOW
    }

    fn bottom(&self) -> f64 {
        self.rect_top + self.height
    }
}

fn max_bottom<'a, I>(candidates: I) -> Option<f64>
where
    I: Iterator<Item = &'a ChromeCandidate>,
{
    candidates
        .map(ChromeCandidate::bottom)
        .filter(|bottom| *bottom > 0.0)
        .fold(None, |acc, bottom| {
            Some(match acc {
                Some(current) if current >= bottom => current,
                _ => bottom,
            })
        })
}

pub fn base_offset(primary: &[ChromeCandidate], fallback: &[ChromeCandidate]) -> f64 {
    let primary_bottom = max_bottom(
        primary
            .iter()
            .filter(|candidate| candidate.anchored_near_top()),
    );
    let bottom = match primary_bottom {
        Some(bottom) => Some(bottom),
        None => max_bottom(fallback.iter().filter(|candidate| {
            candidate.declared_top_near_zero() && candidate.anchored_near_top()
        })),
    };
    match bottom {
        Some(bottom) => bottom + BASE_OFFSET_BUFFER,
        None => 0.0,
    }
}
