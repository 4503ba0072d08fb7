use std::fmt;
use std::marker::PhantomData;

use allocator_api2::alloc::Allocator;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Compare, VectorMap};

const MAX_PREALLOC_ENTRIES: usize = 4096;

impl<K, V, C, A> Serialize for VectorMap<K, V, C, A>
where
    K: Serialize,
    V: Serialize,
    A: Allocator,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct VectorMapVisitor<K, V, C, A: Allocator> {
    marker: PhantomData<fn() -> VectorMap<K, V, C, A>>,
}

impl<'de, K, V, C, A> Visitor<'de> for VectorMapVisitor<K, V, C, A>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
    A: Allocator + Default,
{
    type Value = VectorMap<K, V, C, A>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    /// Entries arriving in key order are appended without a search. A repeated key keeps its
    /// first value. The length announced by the format only pre-sizes up to a fixed cap.
    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = VectorMap::default();
        // the hint comes from the input, never trust it for more than a small head start
        if let Some(hint) = access.size_hint() {
            map.reserve(hint.min(MAX_PREALLOC_ENTRIES));
        }

        while let Some((k, v)) = access.next_entry()? {
            map.insert(k, v);
        }

        Ok(map)
    }
}

impl<'de, K, V, C, A> Deserialize<'de> for VectorMap<K, V, C, A>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
    A: Allocator + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VectorMapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::de::value::{Error as ValueError, MapAccessDeserializer};
    use serde::de::{self, DeserializeSeed, MapAccess};
    use serde::Deserialize;

    use crate::{Natural, Reversed, VectorMap};

    /// Announces far more entries than it yields, like a corrupt length prefix.
    struct OverstatedLength;

    impl<'de> MapAccess<'de> for OverstatedLength {
        type Error = ValueError;

        fn next_key_seed<T: DeserializeSeed<'de>>(
            &mut self,
            _seed: T,
        ) -> Result<Option<T::Value>, Self::Error> {
            Ok(None)
        }

        fn next_value_seed<T: DeserializeSeed<'de>>(
            &mut self,
            _seed: T,
        ) -> Result<T::Value, Self::Error> {
            Err(de::Error::custom("no value without a key"))
        }

        fn size_hint(&self) -> Option<usize> {
            Some(usize::MAX >> 4)
        }
    }

    #[test]
    fn test_deserialize_ignores_huge_size_hint() {
        let map =
            VectorMap::<u32, u32>::deserialize(MapAccessDeserializer::new(OverstatedLength))
                .unwrap();
        assert!(map.is_empty());
        assert!(map.capacity() <= super::MAX_PREALLOC_ENTRIES);
    }

    #[test]
    fn test_json_round_trip() {
        let map: VectorMap<String, u32> = [("b", 2), ("a", 1), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);

        let back: VectorMap<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_deserialize_unsorted_and_duplicates() {
        let map: VectorMap<u32, u32> = serde_json::from_str(r#"{"3":0,"1":1,"3":2}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&3), Some(&0));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_deserialize_with_comparator() {
        let map: VectorMap<u32, (), Reversed<Natural>> =
            serde_json::from_str(r#"{"1":null,"2":null}"#).unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"2":null,"1":null}"#);
    }
}
