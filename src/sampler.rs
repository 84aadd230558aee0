use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::time::Duration;

// ─── Value pools ─────────────────────────────────────────────────
// Fixed enumerations; the metric rule table only ever draws from these.

pub const PRODUCT_CATEGORIES: &[&str] = &["electronics", "clothing", "books", "food"];
pub const ORDER_CATEGORIES: &[&str] = &["electronics", "clothing", "books"];
pub const PAYMENT_METHODS: &[&str] = &["credit_card", "paypal", "bank_transfer"];
pub const ORDER_TYPES: &[&str] = &["standard", "express", "premium"];
pub const ERROR_TYPES: &[&str] = &["timeout", "database_error", "validation_error"];

/// Region label used when the client sends no `X-Region` header.
pub const DEFAULT_REGION: &str = "unknown";

/// Fraction of `/orders` calls that fail validation.
const ORDER_FAILURE_RATE: f64 = 0.05;

/// Order value range in currency units.
const ORDER_VALUE: Range<f64> = 10.0..1000.0;

// ─── Sampler ─────────────────────────────────────────────────────

/// The one randomness source the handlers share.
///
/// Wrapping a single `StdRng` keeps handler behavior reproducible under a
/// fixed seed; the lock is held only for the duration of a draw.
pub struct Sampler {
    rng: Mutex<StdRng>,
}

/// Everything a successful order draws in one go.
#[derive(Debug, Clone)]
pub struct OrderDraw {
    pub order_type: &'static str,
    pub product_category: &'static str,
    pub payment_method: &'static str,
    pub amount: f64,
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform pick from a fixed pool.
    pub fn pick(&self, pool: &'static [&'static str]) -> &'static str {
        let mut rng = self.rng.lock();
        pool[rng.gen_range(0..pool.len())]
    }

    /// Uniform artificial processing delay within `seconds`.
    pub fn delay(&self, seconds: Range<f64>) -> Duration {
        Duration::from_secs_f64(self.rng.lock().gen_range(seconds))
    }

    /// Whether this `/orders` call hits the injected validation failure.
    pub fn order_fails(&self) -> bool {
        self.rng.lock().gen_bool(ORDER_FAILURE_RATE)
    }

    /// Draw the full label/value set for a successful order.
    pub fn order_draw(&self) -> OrderDraw {
        let mut rng = self.rng.lock();
        OrderDraw {
            order_type: ORDER_TYPES[rng.gen_range(0..ORDER_TYPES.len())],
            product_category: ORDER_CATEGORIES[rng.gen_range(0..ORDER_CATEGORIES.len())],
            payment_method: PAYMENT_METHODS[rng.gen_range(0..PAYMENT_METHODS.len())],
            amount: rng.gen_range(ORDER_VALUE),
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
