use crate::geo::{SigType, View, WireId};
use crate::raw::{ChannelId, TdcTick, INVALID_CHANNEL_ID};
use bon::Builder;
use std::cmp::Ordering;
use std::fmt;

/// A reconstructed signal pulse on a single readout channel.
///
/// A [`Hit`] is created once through [`Hit::builder`] and is read-only
/// afterwards. Every field that is not explicitly set takes its "unset"
/// default; uncertainties and the number of degrees of freedom use `-1` to
/// mean "not computed".
///
/// Hits compare and sort by channel, then view, then start tick only (see
/// [`Hit::position_cmp`]). Two hits on the same channel, view and start tick
/// are equal even if their other fields differ.
///
/// # Examples
///
/// ```
/// use dataobj::geo::View;
/// use dataobj::hit::Hit;
///
/// let hit = Hit::builder()
///     .channel(12)
///     .view(View::V)
///     .start_tick(100)
///     .end_tick(150)
///     .peak_time(125.5)
///     .build();
///
/// assert_eq!(hit.channel(), 12);
/// assert_eq!(hit.sigma_peak_time(), -1.0);
/// ```
#[derive(Builder, Clone, Copy, Debug)]
pub struct Hit {
    #[builder(default = INVALID_CHANNEL_ID)]
    channel: ChannelId,
    #[builder(default)]
    start_tick: TdcTick,
    #[builder(default)]
    end_tick: TdcTick,
    #[builder(default)]
    peak_time: f32,
    #[builder(default = -1.0)]
    sigma_peak_time: f32,
    #[builder(default)]
    rms: f32,
    #[builder(default)]
    peak_amplitude: f32,
    #[builder(default = -1.0)]
    sigma_peak_amplitude: f32,
    #[builder(default)]
    summed_adc: f32,
    #[builder(default)]
    integral: f32,
    #[builder(default = -1.0)]
    sigma_integral: f32,
    /// Number of hits sharing the same pulse region.
    #[builder(default)]
    multiplicity: i16,
    /// Index of this hit among the ones sharing its pulse region.
    #[builder(default = -1)]
    local_index: i16,
    #[builder(default)]
    goodness_of_fit: f32,
    #[builder(default = -1)]
    degrees_of_freedom: i32,
    #[builder(default)]
    view: View,
    #[builder(default)]
    signal_type: SigType,
    #[builder(default)]
    wire_id: WireId,
    // Sums over alternative integration windows.
    #[builder(default)]
    summed_adc1: f32,
    #[builder(default)]
    summed_adc2: f32,
    #[builder(default)]
    summed_adc3: f32,
    #[builder(default)]
    summed_adc4: f32,
    #[builder(default)]
    summed_adc5: f32,
    #[builder(default)]
    summed_adc6: f32,
    #[builder(default)]
    summed_adc7: f32,
    #[builder(default)]
    summed_adc8: f32,
    /// Whether the pulse region continues into the next one.
    #[builder(default)]
    continues: bool,
}

impl Default for Hit {
    /// Creates a hit with every field set to its "unset" value.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Hit {
    /// Readout channel of the pulse.
    pub fn channel(&self) -> ChannelId {
        self.channel
    }
    /// First tick of the pulse region.
    pub fn start_tick(&self) -> TdcTick {
        self.start_tick
    }
    /// Last tick of the pulse region.
    pub fn end_tick(&self) -> TdcTick {
        self.end_tick
    }
    /// Time of the pulse peak, in ticks.
    pub fn peak_time(&self) -> f32 {
        self.peak_time
    }
    /// Uncertainty on the peak time, `-1` if not computed.
    pub fn sigma_peak_time(&self) -> f32 {
        self.sigma_peak_time
    }
    /// Width of the pulse, in ticks.
    pub fn rms(&self) -> f32 {
        self.rms
    }
    /// Amplitude of the pulse peak, in ADC counts.
    pub fn peak_amplitude(&self) -> f32 {
        self.peak_amplitude
    }
    /// Uncertainty on the peak amplitude, `-1` if not computed.
    pub fn sigma_peak_amplitude(&self) -> f32 {
        self.sigma_peak_amplitude
    }
    /// Sum of the ADC counts over the pulse region.
    pub fn summed_adc(&self) -> f32 {
        self.summed_adc
    }
    /// Integral of the fitted pulse shape.
    pub fn integral(&self) -> f32 {
        self.integral
    }
    /// Uncertainty on the integral, `-1` if not computed.
    pub fn sigma_integral(&self) -> f32 {
        self.sigma_integral
    }
    /// Number of hits sharing the same pulse region.
    pub fn multiplicity(&self) -> i16 {
        self.multiplicity
    }
    /// Index of this hit among the ones sharing its pulse region.
    pub fn local_index(&self) -> i16 {
        self.local_index
    }
    /// Quality of the pulse shape fit.
    pub fn goodness_of_fit(&self) -> f32 {
        self.goodness_of_fit
    }
    /// Degrees of freedom of the fit, `-1` if not fit.
    pub fn degrees_of_freedom(&self) -> i32 {
        self.degrees_of_freedom
    }
    /// View of the channel.
    pub fn view(&self) -> View {
        self.view
    }
    /// Signal type of the channel.
    pub fn signal_type(&self) -> SigType {
        self.signal_type
    }
    /// Wire the channel reads out; invalid if unset.
    pub fn wire_id(&self) -> WireId {
        self.wire_id
    }
    /// ADC sum over alternative integration window 1.
    pub fn summed_adc1(&self) -> f32 {
        self.summed_adc1
    }
    /// ADC sum over alternative integration window 2.
    pub fn summed_adc2(&self) -> f32 {
        self.summed_adc2
    }
    /// ADC sum over alternative integration window 3.
    pub fn summed_adc3(&self) -> f32 {
        self.summed_adc3
    }
    /// ADC sum over alternative integration window 4.
    pub fn summed_adc4(&self) -> f32 {
        self.summed_adc4
    }
    /// ADC sum over alternative integration window 5.
    pub fn summed_adc5(&self) -> f32 {
        self.summed_adc5
    }
    /// ADC sum over alternative integration window 6.
    pub fn summed_adc6(&self) -> f32 {
        self.summed_adc6
    }
    /// ADC sum over alternative integration window 7.
    pub fn summed_adc7(&self) -> f32 {
        self.summed_adc7
    }
    /// ADC sum over alternative integration window 8.
    pub fn summed_adc8(&self) -> f32 {
        self.summed_adc8
    }
    /// Whether the pulse region continues into the next one.
    pub fn continues(&self) -> bool {
        self.continues
    }

    /// Returns the peak time shifted forward by `sigmas` times the RMS.
    pub fn peak_time_plus_rms(&self, sigmas: f32) -> f32 {
        self.peak_time + sigmas * self.rms
    }
    /// Returns the peak time shifted backward by `sigmas` times the RMS.
    pub fn peak_time_minus_rms(&self, sigmas: f32) -> f32 {
        self.peak_time - sigmas * self.rms
    }
    /// Returns the signed distance of `time` from the peak time, in units of
    /// the RMS.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataobj::hit::Hit;
    ///
    /// let hit = Hit::builder().peak_time(100.0).rms(4.0).build();
    /// assert_eq!(hit.time_distance_as_rms(92.0), -2.0);
    /// ```
    pub fn time_distance_as_rms(&self, time: f32) -> f32 {
        (time - self.peak_time) / self.rms
    }

    /// Compares two hits by channel, then view, then start tick.
    ///
    /// Hits that agree on these three fields compare as
    /// [`Ordering::Equal`] regardless of their other fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataobj::hit::Hit;
    ///
    /// let mut hits = vec![
    ///     Hit::builder().channel(3).build(),
    ///     Hit::builder().channel(1).start_tick(20).build(),
    ///     Hit::builder().channel(1).start_tick(10).build(),
    /// ];
    /// hits.sort();
    ///
    /// assert_eq!(hits[0].start_tick(), 10);
    /// assert_eq!(hits[2].channel(), 3);
    /// ```
    pub fn position_cmp(&self, other: &Self) -> Ordering {
        self.channel
            .cmp(&other.channel)
            .then(self.view.cmp(&other.view))
            .then(self.start_tick.cmp(&other.start_tick))
    }
}

impl PartialEq for Hit {
    fn eq(&self, other: &Self) -> bool {
        self.position_cmp(other) == Ordering::Equal
    }
}

impl Eq for Hit {}

impl PartialOrd for Hit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position_cmp(other)
    }
}

/// Renders the hit on three lines. Floating point values are printed with two
/// decimals and every value is right-aligned in a fixed width.
///
/// The wire identifier is aligned as a whole in a width of 3, so it is never
/// padded. Logs that padded only its leading `C:` token have one more space
/// before it and will not match byte for byte.
impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " Channel {:>5} View = {:>3} Signal type = {:>3} Wire = {:>3}",
            self.channel, self.view, self.signal_type, self.wire_id
        )?;
        write!(
            f,
            "\n\tStartTick = {:>7}\tEndTick = {:>7}\tPeakTime = {:>7.2} +/- {:>7.2}\tRMS = {:>7.2}",
            self.start_tick, self.end_tick, self.peak_time, self.sigma_peak_time, self.rms
        )?;
        write!(
            f,
            "\n\tAmplitude = {:>7.2} +/- {:>7.2}\tIntegral = {:>7.2} +/- {:>7.2}\tADCsum = {:>7.2}",
            self.peak_amplitude,
            self.sigma_peak_amplitude,
            self.integral,
            self.sigma_integral,
            self.summed_adc
        )?;
        writeln!(
            f,
            "\tMultiplicity = {:>5} of {}\tGoodnessOfFit = {:>7.2} DoF = {:>7}",
            self.local_index, self.multiplicity, self.goodness_of_fit, self.degrees_of_freedom
        )
    }
}
