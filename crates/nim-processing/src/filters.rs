//! Butterworth bandpass design and IIR filtering

use crate::processor::SignalProcessor;
use nim_core::{NimError, NimResult, Signal};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Filter order used when none is given
pub const DEFAULT_ORDER: usize = 5;

/// Imaginary parts below this are treated as real poles when pairing sections
const REAL_POLE_TOLERANCE: f64 = 1e-12;

/// Bandpass filter parameters in physical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Low cutoff (Hz)
    pub low_cutoff: f64,
    /// High cutoff (Hz)
    pub high_cutoff: f64,
    /// Sampling rate of the filtered data (Hz)
    pub sampling_rate: f64,
    /// Butterworth prototype order; the bandpass has twice as many poles
    pub order: usize,
}

impl FilterSpec {
    /// Create bandpass specification with the default order
    pub fn bandpass(low_cutoff: f64, high_cutoff: f64, sampling_rate: f64) -> Self {
        Self {
            low_cutoff,
            high_cutoff,
            sampling_rate,
            order: DEFAULT_ORDER,
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn nyquist(&self) -> f64 {
        0.5 * self.sampling_rate
    }

    /// Band edges as fractions of the Nyquist frequency
    ///
    /// Fails unless `0 < low < high < 1`, the sampling rate is positive and
    /// finite, and the order is at least 1.
    pub fn normalized_band(&self) -> NimResult<(f64, f64)> {
        if !(self.sampling_rate.is_finite() && self.sampling_rate > 0.0) {
            return Err(NimError::InvalidSamplingRate { rate: self.sampling_rate });
        }

        if self.order == 0 {
            return Err(NimError::InvalidFilterOrder { order: self.order });
        }

        let nyquist = self.nyquist();
        let low = self.low_cutoff / nyquist;
        let high = self.high_cutoff / nyquist;

        // Negated comparisons so NaN edges are rejected too
        if !(low > 0.0) {
            return Err(NimError::InvalidFilterBand {
                low,
                high,
                reason: "low edge must be above zero",
            });
        }
        if !(high < 1.0) {
            return Err(NimError::InvalidFilterBand {
                low,
                high,
                reason: "high edge must be below the Nyquist frequency",
            });
        }
        if low >= high {
            return Err(NimError::InvalidFilterBand {
                low,
                high,
                reason: "low edge must be below high edge",
            });
        }

        Ok((low, high))
    }

    pub fn validate(&self) -> NimResult<()> {
        self.normalized_band().map(|_| ())
    }
}

/// Transfer function coefficients, `b` numerator and `a` denominator
///
/// Both polynomials are non-empty and finite with `a[0] == 1`; deserialization
/// goes through [`FilterCoefficients::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoefficients")]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

#[derive(Deserialize)]
struct RawCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl TryFrom<RawCoefficients> for FilterCoefficients {
    type Error = NimError;

    fn try_from(raw: RawCoefficients) -> NimResult<Self> {
        Self::new(raw.b, raw.a)
    }
}

impl FilterCoefficients {
    /// Wrap coefficients, normalising so that `a[0] == 1`
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> NimResult<Self> {
        if b.is_empty() || a.is_empty() {
            return Err(NimError::NumericalError {
                reason: "filter coefficients must not be empty".to_string(),
            });
        }

        if b.iter().chain(a.iter()).any(|c| !c.is_finite()) {
            return Err(NimError::NumericalError {
                reason: "filter coefficients are not finite".to_string(),
            });
        }

        let a0 = a[0];
        if a0 == 0.0 {
            return Err(NimError::NumericalError {
                reason: "leading denominator coefficient is zero".to_string(),
            });
        }

        if a0 == 1.0 {
            return Ok(Self { b, a });
        }

        Ok(Self {
            b: b.into_iter().map(|c| c / a0).collect(),
            a: a.into_iter().map(|c| c / a0).collect(),
        })
    }

    /// Numerator coefficients
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients, `a[0] == 1`
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Filter order as the degree of the denominator
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Number of coefficients in the longer polynomial
    pub fn len(&self) -> usize {
        self.a.len().max(self.b.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the difference equation from zero initial state
    ///
    /// Transposed direct form II:
    /// `y[n] = b0*x[n] + z0`, `z_i = b_{i+1}*x[n] + z_{i+1} - a_{i+1}*y[n]`.
    /// High-order bandpass designs lose their poles to rounding in this form;
    /// [`ButterworthBandpass`] filters with second-order sections instead.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let n = self.len();
        let coeff = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0);

        let mut state = vec![0.0; n.saturating_sub(1)];
        let mut output = Vec::with_capacity(input.len());

        for &x in input {
            let y = coeff(&self.b, 0) * x + state.first().copied().unwrap_or(0.0);

            for i in 0..state.len() {
                let next = state.get(i + 1).copied().unwrap_or(0.0);
                state[i] = coeff(&self.b, i + 1) * x + next - coeff(&self.a, i + 1) * y;
            }

            output.push(y);
        }

        output
    }

    /// Complex response at normalised angular frequency `omega` (rad/sample)
    pub fn frequency_response(&self, omega: f64) -> Complex64 {
        evaluate_polynomial(&self.b, omega) / evaluate_polynomial(&self.a, omega)
    }

    /// All roots of the denominator strictly inside the unit circle
    ///
    /// Jury/Schur-Cohn step-down on the coefficients as stored, so it reports
    /// the stability of this realisation, rounding included.
    pub fn is_stable(&self) -> bool {
        let mut poly = self.a.clone();

        while poly.len() > 1 {
            let degree = poly.len() - 1;
            let k = poly[degree] / poly[0];
            if !(k.abs() < 1.0) {
                return false;
            }

            let denom = 1.0 - k * k;
            poly = (0..degree)
                .map(|i| (poly[i] - k * poly[degree - i]) / denom)
                .collect();
        }

        true
    }
}

/// Single biquad section (2nd order)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadSection {
    // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
    pub b: [f64; 3],
    pub a: [f64; 3],
}

impl BiquadSection {
    /// Filter `data` in place from zero state
    fn process_in_place(&self, data: &mut [f64]) {
        let [b0, b1, b2] = self.b;
        let [_, a1, a2] = self.a;
        let (mut z1, mut z2) = (0.0, 0.0);

        for sample in data.iter_mut() {
            let x = *sample;
            let y = b0 * x + z1;
            z1 = b1 * x + z2 - a1 * y;
            z2 = b2 * x - a2 * y;
            *sample = y;
        }
    }

    fn frequency_response(&self, omega: f64) -> Complex64 {
        evaluate_polynomial(&self.b, omega) / evaluate_polynomial(&self.a, omega)
    }
}

/// Digital Butterworth bandpass filter
///
/// Designed in zero/pole/gain form and realised as a cascade of second-order
/// sections, ordered so the poles nearest the unit circle come last.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthBandpass {
    spec: FilterSpec,
    sections: Vec<BiquadSection>,
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl ButterworthBandpass {
    /// Design the filter for `spec`
    pub fn new(spec: FilterSpec) -> NimResult<Self> {
        let (low, high) = spec.normalized_band()?;
        let design = design_bandpass(spec.order, low, high)?;
        let sections = pair_sections(&design)?;

        debug!(
            low_cutoff = spec.low_cutoff,
            high_cutoff = spec.high_cutoff,
            sampling_rate = spec.sampling_rate,
            order = spec.order,
            low_normalized = low,
            high_normalized = high,
            sections = sections.len(),
            "designed Butterworth bandpass"
        );

        Ok(Self {
            spec,
            sections,
            zeros: design.zeros,
            poles: design.poles,
            gain: design.gain,
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn sections(&self) -> &[BiquadSection] {
        &self.sections
    }

    pub fn zeros(&self) -> &[Complex64] {
        &self.zeros
    }

    pub fn poles(&self) -> &[Complex64] {
        &self.poles
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// All designed poles strictly inside the unit circle
    pub fn is_stable(&self) -> bool {
        self.poles.iter().all(|p| p.norm() < 1.0)
    }

    /// Expanded transfer function `b(z) / a(z)` of order `2 * order`
    pub fn transfer_function(&self) -> NimResult<FilterCoefficients> {
        let b = poly(&self.zeros).into_iter().map(|c| self.gain * c.re).collect();
        let a = poly(&self.poles).into_iter().map(|c| c.re).collect();
        FilterCoefficients::new(b, a)
    }

    /// Filter `data`; output has the same length as the input
    pub fn filter(&self, data: &[f64]) -> Vec<f64> {
        trace!(samples = data.len(), sections = self.sections.len(), "applying Butterworth bandpass");

        let mut output = data.to_vec();
        for section in &self.sections {
            section.process_in_place(&mut output);
        }
        output
    }

    /// Complex response at a physical frequency in Hz
    pub fn frequency_response(&self, frequency: f64) -> Complex64 {
        let omega = 2.0 * PI * frequency / self.spec.sampling_rate;
        self.sections
            .iter()
            .map(|section| section.frequency_response(omega))
            .product()
    }

    /// Magnitude response at a physical frequency in Hz
    pub fn gain_at(&self, frequency: f64) -> f64 {
        self.frequency_response(frequency).norm()
    }
}

impl SignalProcessor for ButterworthBandpass {
    fn process(&self, input: &Signal) -> NimResult<Signal> {
        if input.sampling_rate != self.spec.sampling_rate {
            return Err(NimError::InvalidSignalData {
                reason: format!(
                    "Signal sampled at {}Hz but filter designed for {}Hz",
                    input.sampling_rate, self.spec.sampling_rate
                ),
            });
        }

        Ok(input.with_samples(self.filter(input.as_slice())))
    }

    fn name(&self) -> &str {
        "Butterworth Bandpass"
    }

    fn can_process(&self, signal: &Signal) -> bool {
        signal.sampling_rate == self.spec.sampling_rate
    }
}

/// Bandpass-filter `data` with a Butterworth filter of the given `order`
///
/// Cutoffs are in Hz. The filter starts from zero state on every call, so the
/// start of the output carries the filter's transient.
pub fn butter_bandpass_filter(
    data: &[f64],
    lowcut: f64,
    highcut: f64,
    sampling_rate: f64,
    order: usize,
) -> NimResult<Vec<f64>> {
    let spec = FilterSpec::bandpass(lowcut, highcut, sampling_rate).with_order(order);
    let filter = ButterworthBandpass::new(spec)?;
    Ok(filter.filter(data))
}

/// Digital zeros, poles and gain of a bandpass design
struct ZpkDesign {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

/// Design a digital Butterworth bandpass from normalised edges `0 < low < high < 1`
///
/// Analog prototype poles are moved to the band with the lowpass-to-bandpass
/// transform, then mapped to the z-plane with the bilinear transform.
fn design_bandpass(order: usize, low: f64, high: f64) -> NimResult<ZpkDesign> {
    // Pre-warp at fs = 2 so normalised edges map onto the analog band
    let fs = 2.0;
    let warp = |w: f64| 2.0 * fs * (PI * w / fs).tan();
    let (w1, w2) = (warp(low), warp(high));
    let wo = (w1 * w2).sqrt();
    let bw = w2 - w1;

    let n = order as f64;
    let prototype: Vec<Complex64> = (0..order)
        .map(|k| {
            let m = -n + 1.0 + 2.0 * k as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    // Each prototype pole splits into a pair around the band centre
    let wo2 = Complex64::new(wo * wo, 0.0);
    let scaled: Vec<Complex64> = prototype.iter().map(|&p| p * (bw / 2.0)).collect();
    let upper: Vec<Complex64> = scaled.iter().map(|&p| p + (p * p - wo2).sqrt()).collect();
    let lower: Vec<Complex64> = scaled.iter().map(|&p| p - (p * p - wo2).sqrt()).collect();

    let fs2 = Complex64::new(2.0 * fs, 0.0);
    let poles: Vec<Complex64> = upper
        .iter()
        .chain(lower.iter())
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    // Origin zeros map to z = 1, the degree difference adds zeros at z = -1
    let zeros: Vec<Complex64> = std::iter::repeat(Complex64::new(1.0, 0.0))
        .take(order)
        .chain(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(order))
        .collect();

    // bw^N * fs2^N / prod(fs2 - p), one pole pair per factor so nothing overflows
    let gain = upper
        .iter()
        .zip(&lower)
        .fold(Complex64::new(1.0, 0.0), |acc, (&a, &b)| {
            acc * (fs2 * bw) / ((fs2 - a) * (fs2 - b))
        })
        .re;

    if poles.iter().any(|p| !(p.re.is_finite() && p.im.is_finite())) {
        return Err(NimError::NumericalError {
            reason: format!("Butterworth design of order {} is not finite", order),
        });
    }

    if !gain.is_normal() {
        return Err(NimError::NumericalError {
            reason: format!(
                "Butterworth design of order {} has gain {:e} outside the f64 normal range",
                order, gain
            ),
        });
    }

    Ok(ZpkDesign { zeros, poles, gain })
}

/// Group the design into second-order sections
///
/// Every section takes one zero at `z = 1` and one at `z = -1`, plus a
/// conjugate pole pair or two real poles. The overall gain goes on the first
/// section.
fn pair_sections(design: &ZpkDesign) -> NimResult<Vec<BiquadSection>> {
    let mut denominators: Vec<([f64; 3], f64)> = design
        .poles
        .iter()
        .filter(|p| p.im > REAL_POLE_TOLERANCE)
        .map(|p| ([1.0, -2.0 * p.re, p.norm_sqr()], p.norm()))
        .collect();

    let mut real_poles: Vec<f64> = design
        .poles
        .iter()
        .filter(|p| p.im.abs() <= REAL_POLE_TOLERANCE)
        .map(|p| p.re)
        .collect();
    real_poles.sort_by(f64::total_cmp);

    for pair in real_poles.chunks(2) {
        match *pair {
            [r1, r2] => denominators.push(([1.0, -(r1 + r2), r1 * r2], r1.abs().max(r2.abs()))),
            _ => {
                return Err(NimError::NumericalError {
                    reason: "unpaired real pole in bandpass design".to_string(),
                })
            }
        }
    }

    let expected = design.poles.len() / 2;
    if denominators.len() != expected {
        return Err(NimError::NumericalError {
            reason: format!(
                "paired {} sections from {} poles, expected {}",
                denominators.len(),
                design.poles.len(),
                expected
            ),
        });
    }

    denominators.sort_by(|(_, r1), (_, r2)| r1.total_cmp(r2));

    Ok(denominators
        .into_iter()
        .enumerate()
        .map(|(i, (a, _))| {
            let k = if i == 0 { design.gain } else { 1.0 };
            BiquadSection { b: [k, 0.0, -k], a }
        })
        .collect())
}

/// `sum(c_k * e^{-i*omega*k})`
fn evaluate_polynomial(coeffs: &[f64], omega: f64) -> Complex64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, &c)| Complex64::from_polar(c, -omega * k as f64))
        .sum()
}

/// Monic polynomial coefficients (highest power first) with the given roots
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];

    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }

    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_coeffs(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a, e, epsilon = 1e-9);
        }
    }

    fn impulse(len: usize) -> Vec<f64> {
        let mut data = vec![0.0; len];
        data[0] = 1.0;
        data
    }

    #[test]
    fn test_order_two_transfer_function() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.1, 0.4, 2.0).with_order(2)).unwrap();
        let tf = filter.transfer_function().unwrap();

        assert_coeffs(
            tf.b(),
            &[0.13110643991662602, 0.0, -0.26221287983325203, 0.0, 0.13110643991662602],
        );
        assert_coeffs(
            tf.a(),
            &[1.0, -2.180657838602799, 2.0200041161835105, -1.0255108477134178, 0.27221493792500717],
        );
        assert!(tf.is_stable());
    }

    #[test]
    fn test_order_one_transfer_function() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.2, 0.5, 2.0).with_order(1)).unwrap();
        let tf = filter.transfer_function().unwrap();

        assert_coeffs(tf.b(), &[0.3375401518835468, 0.0, -0.3375401518835468]);
        assert_coeffs(tf.a(), &[1.0, -0.6750803037670938, 0.3249196962329064]);
        assert_eq!(filter.sections().len(), 1);
    }

    #[test]
    fn test_default_design() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0)).unwrap();

        assert_eq!(filter.sections().len(), 5);
        assert_eq!(filter.poles().len(), 10);
        assert_eq!(filter.zeros().len(), 10);
        assert!(filter.is_stable());
        assert_abs_diff_eq!(filter.gain(), 5.711213502778824e-05, epsilon = 1e-12);

        // Poles nearest the unit circle are filtered last
        let last = filter.sections().last().unwrap();
        assert_abs_diff_eq!(last.a[1], -1.998081540380535, epsilon = 1e-9);
        assert_abs_diff_eq!(last.a[2], 0.9980914367226026, epsilon = 1e-9);

        let tf = filter.transfer_function().unwrap();
        assert_eq!(tf.order(), 10);
        assert_abs_diff_eq!(tf.a()[1], -8.990200583492257, epsilon = 1e-9);
    }

    #[test]
    fn test_default_design_stays_bounded() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0)).unwrap();
        let response = filter.filter(&impulse(60_000));

        let tail = response[50_000..].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(tail < 1e-12, "impulse response tail {}", tail);
    }

    #[test]
    fn test_band_edges_are_half_power() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(50.0, 200.0, 1000.0).with_order(2)).unwrap();

        assert_abs_diff_eq!(filter.gain_at(50.0), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_abs_diff_eq!(filter.gain_at(200.0), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert!(filter.gain_at(0.0) < 1e-9);
        assert!(filter.gain_at(500.0) < 1e-9);

        let default = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0)).unwrap();
        assert_abs_diff_eq!(default.gain_at(0.5), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
        assert_abs_diff_eq!(default.gain_at(50.0), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_passband_and_stopband_gain() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0)).unwrap();

        assert_abs_diff_eq!(filter.gain_at(10.0), 1.0, epsilon = 1e-6);
        assert!(filter.gain_at(200.0) < 1e-3);
    }

    #[test]
    fn test_impulse_response() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.1, 0.4, 2.0).with_order(2)).unwrap();
        let expected = [
            0.13110643991662602,
            0.2858982858954974,
            0.09639791005811771,
            -0.23285377978596536,
            -0.3138894932057833,
            -0.1930886718641192,
            -0.0520372857476068,
            0.018053593833037465,
            0.03191512365324095,
            0.03232445051555624,
        ];

        assert_coeffs(&filter.filter(&impulse(10)), &expected);

        // Direct form agrees for a well-conditioned design
        let tf = filter.transfer_function().unwrap();
        assert_coeffs(&tf.apply(&impulse(10)), &expected);
    }

    #[test]
    fn test_output_length_matches_input() {
        for len in [0, 1, 7, 1000] {
            let data = vec![1.0; len];
            let output = butter_bandpass_filter(&data, 0.5, 50.0, 1000.0, DEFAULT_ORDER).unwrap();
            assert_eq!(output.len(), len);
        }
    }

    #[test]
    fn test_odd_and_even_orders() {
        for order in 1..=10 {
            for (low, high) in [(0.5, 50.0), (100.0, 200.0), (25.0, 475.0), (240.0, 260.0)] {
                let spec = FilterSpec::bandpass(low, high, 1000.0).with_order(order);
                let filter = ButterworthBandpass::new(spec).unwrap();
                assert_eq!(filter.sections().len(), order);
                assert!(filter.is_stable());
            }
        }
    }

    #[test]
    fn test_invalid_bands() {
        let cases = [
            (0.0, 50.0, 1000.0),
            (-1.0, 50.0, 1000.0),
            (10.0, 500.0, 1000.0),
            (10.0, 600.0, 1000.0),
            (50.0, 10.0, 1000.0),
            (20.0, 20.0, 1000.0),
            (f64::NAN, 50.0, 1000.0),
        ];

        for (low, high, fs) in cases {
            let result = butter_bandpass_filter(&[1.0, 2.0], low, high, fs, DEFAULT_ORDER);
            assert!(
                matches!(result, Err(NimError::InvalidFilterBand { .. })),
                "expected invalid band for [{}, {}] @ {}",
                low, high, fs
            );
        }
    }

    #[test]
    fn test_invalid_band_fails_on_empty_input() {
        let result = butter_bandpass_filter(&[], 50.0, 10.0, 1000.0, DEFAULT_ORDER);
        assert!(matches!(result, Err(NimError::InvalidFilterBand { .. })));
    }

    #[test]
    fn test_invalid_sampling_rate_and_order() {
        assert_eq!(
            butter_bandpass_filter(&[1.0], 0.5, 50.0, 0.0, 5),
            Err(NimError::InvalidSamplingRate { rate: 0.0 })
        );
        assert_eq!(
            butter_bandpass_filter(&[1.0], 0.5, 50.0, 1000.0, 0),
            Err(NimError::InvalidFilterOrder { order: 0 })
        );
    }

    #[test]
    fn test_coefficient_normalisation() {
        let coefficients = FilterCoefficients::new(vec![2.0, 4.0], vec![2.0, 1.0]).unwrap();
        assert_eq!(coefficients.b(), &[1.0, 2.0]);
        assert_eq!(coefficients.a(), &[1.0, 0.5]);

        assert!(FilterCoefficients::new(vec![1.0], vec![0.0, 1.0]).is_err());
        assert!(FilterCoefficients::new(vec![], vec![1.0]).is_err());
        assert!(FilterCoefficients::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_fir_and_unequal_lengths() {
        // Moving sum of two samples
        let fir = FilterCoefficients::new(vec![1.0, 1.0], vec![1.0]).unwrap();
        assert_eq!(fir.apply(&[1.0, 2.0, 3.0]), vec![1.0, 3.0, 5.0]);

        // One-pole recursive smoother y[n] = x[n] + 0.5*y[n-1]
        let iir = FilterCoefficients::new(vec![1.0], vec![1.0, -0.5]).unwrap();
        assert_eq!(iir.apply(&[1.0, 0.0, 0.0]), vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_stability_check() {
        assert!(FilterCoefficients::new(vec![1.0], vec![1.0, -0.5]).unwrap().is_stable());
        assert!(!FilterCoefficients::new(vec![1.0], vec![1.0, -1.5]).unwrap().is_stable());
    }

    #[test]
    fn test_high_order_gain_is_not_lost() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0).with_order(130)).unwrap();

        assert!(filter.gain().is_normal());
        assert!(filter.gain() > 1e-120 && filter.gain() < 1e-100, "gain {:e}", filter.gain());
        assert_abs_diff_eq!(filter.gain_at(10.0), 1.0, epsilon = 1e-6);

        let output = filter.filter(&[1.0; 64]);
        assert!(output.iter().any(|v| *v != 0.0));
    }

    #[test]
    fn test_gain_underflow_is_an_error() {
        let result = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0).with_order(500));
        assert!(matches!(result, Err(NimError::NumericalError { .. })));
    }

    #[test]
    fn test_deserialization_validates() {
        let normalised: FilterCoefficients =
            serde_json::from_str(r#"{"b": [2.0, 4.0], "a": [2.0, 1.0]}"#).unwrap();
        assert_eq!(normalised.a(), &[1.0, 0.5]);
        assert_eq!(normalised.order(), 1);

        assert!(serde_json::from_str::<FilterCoefficients>(r#"{"b": [], "a": []}"#).is_err());
        assert!(serde_json::from_str::<FilterCoefficients>(r#"{"b": [1.0], "a": [0.0]}"#).is_err());

        let original = FilterCoefficients::new(vec![0.5, 0.5], vec![1.0, -0.25]).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(serde_json::from_str::<FilterCoefficients>(&json).unwrap(), original);
    }

    #[test]
    fn test_signal_processor() {
        let filter = ButterworthBandpass::new(FilterSpec::bandpass(0.5, 50.0, 1000.0)).unwrap();
        let signal = Signal::new(vec![1.0; 100], 1000.0).unwrap();

        assert!(filter.can_process(&signal));
        let output = filter.process(&signal).unwrap();
        assert_eq!(output.len(), 100);
        assert_eq!(output.sampling_rate, 1000.0);
        assert_eq!(filter.name(), "Butterworth Bandpass");

        let other_rate = Signal::new(vec![1.0; 100], 500.0).unwrap();
        assert!(!filter.can_process(&other_rate));
        assert!(matches!(
            filter.process(&other_rate),
            Err(NimError::InvalidSignalData { .. })
        ));
    }
}
