//! Ephemeral disk tier selection.

use std::fmt;
use std::sync::Arc;

use crate::datatypes::ItemPrice;
use crate::error::SoftLayerError;

/// Category code of the first local guest disk slot.
pub const EPHEMERAL_DISK_CATEGORY_CODE: &str = "guest_disk1";

/// Extracts the capacity, in GB, advertised by an item price.
pub trait CapacityExtractor: Send + Sync {
    /// Returns the capacity, or `None` when the price carries none.
    fn capacity_gb(&self, price: &ItemPrice) -> Option<i64>;
}

/// Reads `item.capacity`, falling back to the first integer in the item
/// description (`"25 GB (SAN)"` yields 25).
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemCapacityExtractor;

impl CapacityExtractor for ItemCapacityExtractor {
    fn capacity_gb(&self, price: &ItemPrice) -> Option<i64> {
        let item = price.item.as_ref()?;
        item.capacity
            .as_deref()
            .and_then(leading_integer)
            .or_else(|| leading_integer(&item.description))
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Behaviour for a zero-sized ephemeral disk request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroSizePolicy {
    /// Treat zero as "no disk wanted" and skip the order.
    #[default]
    Skip,
    /// Order the smallest available tier.
    Order,
}

/// Chooses the smallest `guest_disk1` tier that holds a requested size.
#[derive(Clone)]
pub struct EphemeralDiskSelector {
    extractor: Arc<dyn CapacityExtractor>,
    zero_size: ZeroSizePolicy,
}

impl Default for EphemeralDiskSelector {
    fn default() -> Self {
        Self {
            extractor: Arc::new(ItemCapacityExtractor),
            zero_size: ZeroSizePolicy::default(),
        }
    }
}

impl fmt::Debug for EphemeralDiskSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralDiskSelector")
            .field("zero_size", &self.zero_size)
            .finish_non_exhaustive()
    }
}

impl EphemeralDiskSelector {
    /// Replaces the capacity extraction rule.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl CapacityExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Sets the zero-size behaviour.
    #[must_use]
    pub const fn with_zero_size_policy(mut self, policy: ZeroSizePolicy) -> Self {
        self.zero_size = policy;
        self
    }

    /// Checks a requested size. `Ok(None)` means nothing should be ordered.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Validation`] for negative sizes.
    pub fn requested_size(&self, size_gb: i64) -> Result<Option<i64>, SoftLayerError> {
        if size_gb < 0 {
            return Err(SoftLayerError::Validation(format!(
                "Ephemeral disk size can not be negative: {size_gb}"
            )));
        }
        if size_gb == 0 && self.zero_size == ZeroSizePolicy::Skip {
            return Ok(None);
        }
        Ok(Some(size_gb))
    }

    /// Returns the price with the smallest capacity at least `size_gb`.
    #[must_use]
    pub fn select<'p>(&self, prices: &'p [ItemPrice], size_gb: i64) -> Option<&'p ItemPrice> {
        prices
            .iter()
            .filter(|price| price.in_category(EPHEMERAL_DISK_CATEGORY_CODE))
            .filter_map(|price| {
                self.extractor
                    .capacity_gb(price)
                    .map(|capacity| (capacity, price))
            })
            .filter(|(capacity, _)| *capacity >= size_gb)
            .min_by_key(|(capacity, _)| *capacity)
            .map(|(_, price)| price)
    }
}
