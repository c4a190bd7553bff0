use crate::error::Error;
use crate::ShortIdGenerator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallurl_core::{base62, LengthClass, ShortId};
use typed_builder::TypedBuilder;

/// Value the generator pulls samples toward. Encodes to a 3-digit id.
pub const DEFAULT_BIAS: i64 = 10_000;
/// Exclusive upper bound of the uniform sample, `2^31 - 1`.
pub const DEFAULT_UPPER_BOUND: i64 = i32::MAX as i64;

const INFLUENCE_CENTER: f64 = 50.0;
const MAX_INFLUENCE: u32 = 100;

/// Configures a [`BiasedGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct BiasSettings {
    /// Target magnitude the samples cluster around.
    #[builder(default = DEFAULT_BIAS)]
    pub bias: i64,
    /// Samples are drawn uniformly from `[0, upper_bound)`.
    #[builder(default = DEFAULT_UPPER_BOUND)]
    pub upper_bound: i64,
}

impl Default for BiasSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Random short id generator biased toward a fixed magnitude.
///
/// Each call draws a uniform value and an "influence" in `[0, 100]`, then
/// moves the value toward the bias by a Gaussian weight of the influence
/// whose width is the [`LengthClass`] deviation. Wide bells almost always
/// land near the bias (short ids); a narrow bell leaves the uniform sample
/// untouched (long ids). The result is base-62 encoded.
///
/// One seeded RNG is shared by all callers behind a mutex.
pub struct BiasedGenerator {
    settings: BiasSettings,
    rng: Mutex<StdRng>,
}

impl BiasedGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new(settings: BiasSettings) -> Result<Self, Error> {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Creates a generator with a fixed seed, for reproducible sequences.
    pub fn with_seed(settings: BiasSettings, seed: u64) -> Result<Self, Error> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: BiasSettings, rng: StdRng) -> Result<Self, Error> {
        if settings.upper_bound <= 0 {
            return Err(Error::EmptyRange {
                upper_bound: settings.upper_bound,
            });
        }
        if !(0..settings.upper_bound).contains(&settings.bias) {
            return Err(Error::BiasOutOfRange {
                bias: settings.bias,
                upper_bound: settings.upper_bound,
            });
        }

        Ok(Self {
            settings,
            rng: Mutex::new(rng),
        })
    }

    /// Draws the next biased integer for `class`.
    pub fn next_value(&self, class: LengthClass) -> u64 {
        let (x, influence) = {
            let mut rng = self.rng.lock();
            let x = rng.random_range(0..self.settings.upper_bound);
            let influence = rng.random_range(0..=MAX_INFLUENCE);
            (x, influence)
        };

        let weight = gauss(influence, class.deviation());
        let pulled = pull_toward(x, self.settings.bias, weight);
        // pull_toward stays between x and the bias, both non-negative.
        pulled.max(0) as u64
    }
}

impl Default for BiasedGenerator {
    fn default() -> Self {
        Self {
            settings: BiasSettings::default(),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl std::fmt::Debug for BiasedGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiasedGenerator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ShortIdGenerator for BiasedGenerator {
    fn generate(&self, class: LengthClass) -> ShortId {
        ShortId::new_unchecked(base62::encode(self.next_value(class)))
    }
}

/// Bell curve of unit height centred on influence 50 with width `deviation`.
fn gauss(influence: u32, deviation: f64) -> f64 {
    let d = f64::from(influence) - INFLUENCE_CENTER;
    (-(d * d) / (2.0 * deviation * deviation)).exp()
}

/// Moves `x` toward `bias` by the fraction `weight` in `[0, 1]`, rounding
/// the step down.
fn pull_toward(x: i64, bias: i64, weight: f64) -> i64 {
    if x > bias {
        x + (weight * (bias - x) as f64).floor() as i64
    } else {
        x - (weight * (x - bias) as f64).floor() as i64
    }
}
