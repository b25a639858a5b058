use crate::error::{ChartError, ChartResult};

/// Linear mapping from a data domain onto a pixel span starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    pub fn domain_to_pixel(self, value: f64, span_px: f64) -> ChartResult<f64> {
        validate_span(span_px)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * span_px)
    }
}

fn validate_span(span_px: f64) -> ChartResult<()> {
    if !span_px.is_finite() || span_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "pixel span must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
