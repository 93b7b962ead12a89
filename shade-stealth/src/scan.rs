//! Scanning a batch of announcements for the ones addressed to us.
//!
//! Pure function over a slice: malformed records are counted and skipped,
//! mismatches are counted and skipped, hits carry the full reconstruction.
//! There is no shared state, so callers can shard large batches across
//! threads and sum the stats.

use tracing::debug;

use shade_core::types::{Announcement, SecretKeyBytes};

use crate::reconstruct::{reconstruct, Reconstruction};

/// One announcement that reconstructed to a matching stealth address.
#[derive(Clone, Debug)]
pub struct ScanHit {
    /// Position of the announcement in the scanned slice.
    pub index: usize,
    /// The successful reconstruction, including the spendable key pair.
    pub reconstruction: Reconstruction,
}

/// Counters for one scan pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Announcements examined.
    pub scanned: usize,
    /// Announcements that reconstructed to a matching address.
    pub matched: usize,
    /// Announcements skipped as malformed.
    pub invalid: usize,
}

/// Reconstructs every announcement and collects the matches.
pub fn scan_announcements(
    scan_priv: &SecretKeyBytes,
    spend_priv: &SecretKeyBytes,
    announcements: &[Announcement],
) -> (Vec<ScanHit>, ScanStats) {
    let mut hits = Vec::new();
    let mut stats = ScanStats::default();

    for (index, announcement) in announcements.iter().enumerate() {
        stats.scanned += 1;
        match reconstruct(scan_priv, spend_priv, announcement) {
            Ok(reconstruction) if reconstruction.matches => {
                stats.matched += 1;
                hits.push(ScanHit {
                    index,
                    reconstruction,
                });
            }
            Ok(_) => {}
            Err(e) => {
                stats.invalid += 1;
                debug!(index, error = %e, "skipping malformed announcement");
            }
        }
    }

    (hits, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use crate::derive::derive_for_identity_with_ephemeral;
    use crate::receiver::generate_receiver_identity_from;
    use shade_core::types::ReceiverIdentity;
    use shade_crypto::curve;

    fn identity(seed: u64) -> ReceiverIdentity {
        generate_receiver_identity_from(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap()
    }

    fn announce(receiver: &ReceiverIdentity, seed: u64) -> Announcement {
        let eph =
            curve::generate_secret_scalar_from(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        derive_for_identity_with_ephemeral(receiver, &eph, b"").unwrap()
    }

    #[test]
    fn test_scan_picks_out_our_announcements() {
        let us = identity(40);
        let them = identity(41);

        let batch = vec![
            announce(&them, 50),
            announce(&us, 51),
            announce(&them, 52),
            announce(&us, 53),
        ];

        let (hits, stats) = scan_announcements(&us.scan.private_key, &us.spend.private_key, &batch);
        assert_eq!(stats.scanned, 4);
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.invalid, 0);
        assert_eq!(
            hits.iter().map(|h| h.index).collect::<Vec<_>>(),
            vec![1, 3]
        );
        for hit in &hits {
            assert!(hit.reconstruction.matches);
        }
    }

    #[test]
    fn test_scan_skips_malformed_and_continues() {
        let us = identity(42);
        let mut broken = announce(&us, 54);
        broken.ephemeral_pub_hash = shade_core::types::Coordinate::from_array([0u8; 32]);

        let batch = vec![broken, announce(&us, 55)];
        let (hits, stats) = scan_announcements(&us.scan.private_key, &us.spend.private_key, &batch);
        assert_eq!(stats.scanned, 2);
        assert_eq!(stats.invalid, 1);
        assert_eq!(stats.matched, 1);
        assert_eq!(hits[0].index, 1);
    }

    #[test]
    fn test_scan_empty_batch() {
        let us = identity(43);
        let (hits, stats) = scan_announcements(&us.scan.private_key, &us.spend.private_key, &[]);
        assert!(hits.is_empty());
        assert_eq!(stats, ScanStats::default());
    }
}
