// Copyright (c) 2022 Bastiaan Marinus van de Weerd


macro_rules! str_offset { ( $s0:expr, $s:expr ) => {
	// SAFETY: It is assumed that `$s0` and `$s` point into the same string slice
	unsafe { $s.as_ptr().offset_from($s0.as_ptr()) as usize }
} }
pub(crate) use str_offset;

/// On failure, returns the remainder of `s` starting at the first mismatching byte.
pub(crate) fn try_strip_prefix<'s>(s: &'s str, prefix: &str) -> Result<&'s str, &'s str> {
	s.strip_prefix(prefix).ok_or_else(|| {
		let p = s.bytes().zip(prefix.bytes())
			.position(|(s, p)| s != p)
			.unwrap_or_else(|| s.len().min(prefix.len()));
		&s[p..]
	})
}
