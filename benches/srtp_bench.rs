use criterion::{criterion_group, criterion_main, Criterion};
use srtp_core::{Config, ContextFactory, MasterKeyMaterial, Policy, Transformer};

fn sample_rtp_packet(seq: u16) -> Vec<u8> {
    let mut p = vec![0u8; 12];
    p[0] = 0x80;
    p[1] = 96;
    p[2..4].copy_from_slice(&seq.to_be_bytes());
    p[8..12].copy_from_slice(&0xCAFEBABEu32.to_be_bytes());
    p.extend_from_slice(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
    p
}

fn benchmark_protect_rtp(c: &mut Criterion) {
    let key_material = MasterKeyMaterial {
        master_key: vec![0u8; 16],
        master_salt: vec![0u8; 14],
    };
    let factory = ContextFactory::new(
        true,
        key_material,
        Policy::aes_cm_hmac_sha1_80(),
        Policy::aes_cm_hmac_sha1_80(),
        &Config::new(),
    )
    .unwrap();
    let transformer = Transformer::new(factory);
    let mut seq = 0u16;

    c.bench_function("protect_rtp", |b| {
        b.iter(|| {
            let mut pkt = sample_rtp_packet(seq);
            seq = seq.wrapping_add(1);
            transformer.protect_rtp(&mut pkt).unwrap();
        });
    });
}

fn benchmark_protect_then_unprotect_rtp(c: &mut Criterion) {
    let key_material = MasterKeyMaterial {
        master_key: vec![0u8; 16],
        master_salt: vec![0u8; 14],
    };
    let sender = Transformer::new(
        ContextFactory::new(
            true,
            MasterKeyMaterial {
                master_key: key_material.master_key.clone(),
                master_salt: key_material.master_salt.clone(),
            },
            Policy::aes_cm_hmac_sha1_80(),
            Policy::aes_cm_hmac_sha1_80(),
            &Config::new(),
        )
        .unwrap(),
    );
    let receiver = Transformer::new(
        ContextFactory::new(
            false,
            key_material,
            Policy::aes_cm_hmac_sha1_80(),
            Policy::aes_cm_hmac_sha1_80(),
            &Config::new(),
        )
        .unwrap(),
    );
    let mut seq = 0u16;

    c.bench_function("protect_then_unprotect_rtp", |b| {
        b.iter(|| {
            let mut pkt = sample_rtp_packet(seq);
            seq = seq.wrapping_add(1);
            sender.protect_rtp(&mut pkt).unwrap();
            receiver.unprotect_rtp(&mut pkt).unwrap();
        });
    });
}

criterion_group!(
    benches,
    benchmark_protect_rtp,
    benchmark_protect_then_unprotect_rtp
);
criterion_main!(benches);
