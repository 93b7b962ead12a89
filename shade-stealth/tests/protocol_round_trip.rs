//! End-to-end protocol flow: receiver keygen, sender derivation, JSON
//! persistence shape, receiver reconstruction.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use shade_core::types::{Announcement, ReceiverIdentity};
use shade_crypto::curve;
use shade_stealth::{
    derive_for_identity_with_ephemeral, derive_for_public_keys_with_ephemeral,
    generate_receiver_identity_from, reconstruct, scan_announcements,
};

fn receiver(seed: u64) -> ReceiverIdentity {
    generate_receiver_identity_from(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap()
}

fn announce(identity: &ReceiverIdentity, seed: u64, aux: &[u8]) -> Announcement {
    let eph = curve::generate_secret_scalar_from(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
    derive_for_identity_with_ephemeral(identity, &eph, aux).unwrap()
}

#[test]
fn full_reference_flow_round_trips() {
    let identity = receiver(100);
    let announcement = announce(&identity, 101, b"hello receiver");

    // What the sender wrote down in reference mode must be exactly what the
    // receiver reconstructs on its own.
    let result = reconstruct(
        &identity.scan.private_key,
        &identity.spend.private_key,
        &announcement,
    )
    .unwrap();

    assert!(result.matches);
    assert_eq!(result.stealth_address, announcement.stealth_address);
    assert_eq!(
        Some(result.key_pair.private_key.clone()),
        announcement.stealth_priv
    );
    assert_eq!(
        result.key_pair.public_key_uncompressed,
        announcement.stealth_pub_uncompressed
    );
    assert!(result.key_pair.validate().is_ok());
}

#[test]
fn flow_survives_json_persistence() {
    let identity = receiver(102);
    let announcement = announce(&identity, 103, b"hello receiver");

    // receiver.json / announcement.json round trip.
    let identity_json = serde_json::to_string_pretty(&identity).unwrap();
    let announcement_json = serde_json::to_string_pretty(&announcement).unwrap();
    let identity: ReceiverIdentity = serde_json::from_str(&identity_json).unwrap();
    let announcement: Announcement = serde_json::from_str(&announcement_json).unwrap();

    let result = reconstruct(
        &identity.scan.private_key,
        &identity.spend.private_key,
        &announcement,
    )
    .unwrap();
    assert!(result.matches);
}

#[test]
fn production_announcement_is_spendable_by_receiver_only() {
    let identity = receiver(104);
    let stranger = receiver(105);
    let eph = curve::generate_secret_scalar_from(&mut ChaCha20Rng::seed_from_u64(106)).unwrap();

    let announcement = derive_for_public_keys_with_ephemeral(
        &identity.scan.public_key_uncompressed,
        &identity.spend.public_key_uncompressed,
        &eph,
        b"",
    )
    .unwrap();
    assert!(announcement.ephemeral_priv_key.is_none());
    assert!(announcement.stealth_priv.is_none());

    let ours = reconstruct(
        &identity.scan.private_key,
        &identity.spend.private_key,
        &announcement,
    )
    .unwrap();
    assert!(ours.matches);

    let theirs = reconstruct(
        &stranger.scan.private_key,
        &stranger.spend.private_key,
        &announcement,
    )
    .unwrap();
    assert!(!theirs.matches);
    assert_ne!(theirs.stealth_address, ours.stealth_address);
}

#[test]
fn scanning_a_mixed_batch_finds_exactly_our_payments() {
    let us = receiver(107);
    let them = receiver(108);

    let batch: Vec<Announcement> = (0..6)
        .map(|i| {
            let target = if i % 2 == 0 { &them } else { &us };
            announce(target, 200 + i, b"memo").for_broadcast()
        })
        .collect();

    let (hits, stats) = scan_announcements(&us.scan.private_key, &us.spend.private_key, &batch);
    assert_eq!(stats.scanned, 6);
    assert_eq!(stats.matched, 3);
    assert_eq!(stats.invalid, 0);
    assert_eq!(hits.iter().map(|h| h.index).collect::<Vec<_>>(), vec![1, 3, 5]);
}
