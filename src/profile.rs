use crate::errors::CoreError;

/// Truncates `profile` to `n` elements if longer, or zero-pads it on the right if shorter.
///
/// # Arguments
///
/// * 'profile' - the profile to pad or truncate
/// * 'n' - the target length
pub fn pad(profile: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n];
    let copy_len = profile.len().min(n);
    out[..copy_len].copy_from_slice(&profile[..copy_len]);
    out
}

/// Sums a collection of profiles pointwise, zero-extending shorter ones to the length of the
/// longest. Returns an empty vector if `profiles` is empty.
///
/// # Arguments
///
/// * 'profiles' - the profiles to align and sum
pub fn sum_aligned<'a, I>(profiles: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let profiles: Vec<&[f64]> = profiles.into_iter().collect();
    let Some(ticks) = profiles.iter().map(|p| p.len()).max() else {
        return Vec::new();
    };

    let mut sum = vec![0.0; ticks];
    for profile in profiles {
        for (s, &v) in sum.iter_mut().zip(profile.iter()) {
            *s += v;
        }
    }
    sum
}

/// Computes the pointwise difference `a - b`, zero-extending the shorter operand to the length
/// of the longer one.
///
/// # Arguments
///
/// * 'a' - the minuend profile
/// * 'b' - the subtrahend profile
pub fn sub_aligned(a: &[f64], b: &[f64]) -> Vec<f64> {
    let ticks = a.len().max(b.len());
    let mut out = vec![0.0; ticks];
    for (i, v) in out.iter_mut().enumerate() {
        let av = a.get(i).copied().unwrap_or(0.0);
        let bv = b.get(i).copied().unwrap_or(0.0);
        *v = av - bv;
    }
    out
}

/// Validates that a profile is non-empty and every element is finite and non-negative.
///
/// # Arguments
///
/// * 'profile' - the profile to validate
pub fn validate(profile: &[f64]) -> Result<(), CoreError> {
    if profile.is_empty() {
        return Err(CoreError::InvalidRequest("profile must not be empty".into()));
    }
    if let Some(bad) = profile.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(CoreError::InvalidRequest(format!(
            "profile element {} is not finite and non-negative",
            bad
        )));
    }
    Ok(())
}
