use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .trim()
        .chars()
        .next()
        .into_iter()
        .chain(last_name.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn stable_pair<T: Hash + ?Sized>(key: &T) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}
