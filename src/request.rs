use std::hash::{Hash, Hasher};

/// A deferrable load awaiting execution. Immutable once admitted to a hub; the hub tracks its
/// own per-waiting-request bookkeeping (remaining timeout, planned offset) rather than mutating
/// this value.
#[derive(Debug, Clone)]
pub struct Request {
    pub request_id: u64,
    pub device_name: String,
    pub profile: Vec<f64>,
    pub timeout: u32,
}

impl Request {
    /// Builds a new request.
    ///
    /// # Arguments
    ///
    /// * 'request_id' - globally unique id across live and historical requests of a hub
    /// * 'device_name' - human label, informational only
    /// * 'profile' - the load's per-tick demand profile
    /// * 'timeout' - maximum number of ticks the request may remain waiting before it must start
    pub fn new(request_id: u64, device_name: impl Into<String>, profile: Vec<f64>, timeout: u32) -> Self {
        Request {
            request_id,
            device_name: device_name.into(),
            profile,
            timeout,
        }
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.request_id == other.request_id
    }
}
impl Eq for Request {}

impl Hash for Request {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.request_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_request_id_alone() {
        let a = Request::new(1, "kettle", vec![0.1], 0);
        let b = Request::new(1, "other name", vec![9.9, 9.9], 40);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_ids_are_unequal_even_with_identical_payload() {
        let a = Request::new(1, "kettle", vec![0.1], 0);
        let b = Request::new(2, "kettle", vec![0.1], 0);
        assert_ne!(a, b);
    }
}
