// Round-trip coverage for every method over the canonical payload shapes:
//
// * empty buffer
// * single byte
// * 1 MiB of random bytes
// * 1 MiB of highly repetitive text
// * all-zero buffer

#[cfg(test)]
mod tests {
    use compression_core::{compress, decompress, CompressionMethod, SimpleCompression};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    const MIB: usize = 1024 * 1024;

    fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);
        buf
    }

    fn repetitive_bytes(len: usize) -> Vec<u8> {
        b"the quick brown fox jumps over the lazy dog. "
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect()
    }

    fn assert_roundtrip(data: &[u8]) {
        for method in CompressionMethod::ALL {
            let framed = compress(data, method)
                .unwrap_or_else(|e| panic!("{} compress failed: {}", method, e));
            let restored = decompress(&framed, method)
                .unwrap_or_else(|e| panic!("{} decompress failed: {}", method, e));
            assert_eq!(restored.len(), data.len(), "{} length", method);
            assert!(restored == data, "{} content differs", method);
        }
    }

// # ✅ 1. Canonical payloads

    #[test]
    fn roundtrip_empty() {
        assert_roundtrip(&[]);
    }

    #[test]
    fn roundtrip_single_byte() {
        assert_roundtrip(&[0x42]);
        assert_roundtrip(&[0x00]);
        assert_roundtrip(&[0xff]);
    }

    #[test]
    fn roundtrip_random_1mib() {
        assert_roundtrip(&random_bytes(MIB, 0x5eed));
    }

    #[test]
    fn roundtrip_repetitive_1mib() {
        assert_roundtrip(&repetitive_bytes(MIB));
    }

    #[test]
    fn roundtrip_all_zeros() {
        assert_roundtrip(&vec![0u8; MIB]);
    }

// # ✅ 2. Buffers around the read-chunk boundary

    #[test]
    fn roundtrip_chunk_boundaries() {
        for len in [64 * 1024 - 1, 64 * 1024, 64 * 1024 + 1, 3 * 64 * 1024 + 17] {
            assert_roundtrip(&random_bytes(len, len as u64));
        }
    }

// # ✅ 3. Determinism of decompressed content

    #[test]
    fn compressing_twice_decompresses_identically() {
        let data = repetitive_bytes(100_000);
        for method in CompressionMethod::ALL {
            let a = compress(&data, method).unwrap();
            let b = compress(&data, method).unwrap();
            assert_eq!(decompress(&a, method).unwrap(), decompress(&b, method).unwrap());
        }
    }

// # ✅ 4. A dedicated instance behaves like the shared one

    #[test]
    fn owned_facade_interoperates_with_shared() {
        let facade = SimpleCompression::default();
        let data = repetitive_bytes(4096);
        for method in CompressionMethod::ALL {
            let framed = facade.compress(&data, method).unwrap();
            assert_eq!(decompress(&framed, method).unwrap(), data);
            let framed = compress(&data, method).unwrap();
            assert_eq!(facade.decompress(&framed, method).unwrap(), data);
        }
    }

// # ✅ 5. Property: arbitrary buffers survive every method

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_roundtrip_any_bytes(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            for method in CompressionMethod::ALL {
                let framed = compress(&data, method).unwrap();
                prop_assert_eq!(decompress(&framed, method).unwrap(), data.clone());
            }
        }
    }
}
