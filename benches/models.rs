use std::cmp::Ordering;

#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}
impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// 48 byte payload, the size of a small record.
#[derive(Default, Copy, Clone, Debug)]
pub struct Value {
    _data_0: [u8; 24],
    _data_1: [u8; 24],
}

pub trait TestKey: Ord + Clone {
    fn from_i(i: usize) -> Self;

    fn name() -> String;
}

impl TestKey for Point {
    fn from_i(i: usize) -> Self {
        Point {
            x: i as f64,
            y: i as f64,
        }
    }

    fn name() -> String {
        "Point".into()
    }
}

impl TestKey for u64 {
    fn from_i(i: usize) -> Self {
        i as u64
    }

    fn name() -> String {
        "u64".into()
    }
}

impl TestKey for String {
    fn from_i(i: usize) -> Self {
        format!("key_{:030}", i)
    }

    fn name() -> String {
        "String".into()
    }
}
