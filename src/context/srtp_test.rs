use super::*;

fn master_key() -> Vec<u8> {
    hex(b"E1F97A0D3E018BE0D64FA32C06DE4139")
}

fn master_salt() -> Vec<u8> {
    hex(b"0EC675AD498AFEEBB6960B3AABE6")
}

fn hex(ascii: &[u8]) -> Vec<u8> {
    ascii
        .chunks(2)
        .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap())
        .collect()
}

fn template(is_sender: bool) -> SrtpContext {
    SrtpContext::new_default(
        master_key(),
        master_salt(),
        Policy::aes_cm_hmac_sha1_80(),
        0,
        true,
        is_sender,
    )
    .unwrap()
}

fn keyed(is_sender: bool, ssrc: u32, initial_seq: u16) -> SrtpContext {
    let mut ctx = template(is_sender).derive_context(ssrc, 0, 0);
    ctx.derive_session_keys(initial_seq as u64).unwrap();
    ctx
}

fn rtp_packet(ssrc: u32, seq: u16, payload: &[u8]) -> Vec<u8> {
    let mut p = vec![0u8; 12];
    p[0] = 0x80;
    p[1] = 96;
    p[2..4].copy_from_slice(&seq.to_be_bytes());
    p[8..12].copy_from_slice(&ssrc.to_be_bytes());
    p.extend_from_slice(payload);
    p
}

// RFC 3711 Appendix B AES-CM known-answer vector: the first ciphertext
// bytes produced for a zero SSRC at sequence number 5000 must match
// exactly, independent of header/tag framing.
#[test]
fn aes_cm_ciphertext_matches_known_answer_vector() {
    let master_key = hex(b"0DCD213E4CBCF28F017F6994401E2889");
    let master_salt = hex(b"62776038C06DC9419F6DD9433E7C");

    let mut ctx = SrtpContext::new_default(
        master_key,
        master_salt,
        Policy::aes_cm_hmac_sha1_80(),
        0,
        true,
        true,
    )
    .unwrap()
    .derive_context(0, 0, 0);
    ctx.derive_session_keys(0).unwrap();

    let mut packet = rtp_packet(0, 5000, &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
    assert!(ctx.transform(&mut packet).unwrap());

    assert_eq!(&packet[12..18], hex(b"6DD37ED599B7").as_slice());
}

#[test]
fn simple_ctr_round_trip() {
    let ssrc = 0xCAFEBABE;
    let seq = 0x1234;
    let payload = [0xAB, 0xCD];

    let mut sender = keyed(true, ssrc, seq);
    let mut packet = rtp_packet(ssrc, seq, &payload);
    let original_header = packet[..12].to_vec();
    assert!(sender.transform(&mut packet).unwrap());
    assert_ne!(&packet[12..14], &payload); // ciphertext differs from plaintext
    assert_eq!(&packet[..12], original_header.as_slice());

    let mut receiver = keyed(false, ssrc, seq);
    assert!(receiver.reverse_transform(&mut packet).unwrap());
    assert_eq!(&packet[12..14], &payload);
    assert_eq!(packet.len(), 14); // auth tag stripped back off
}

#[test]
fn replay_rejection_drops_duplicate() {
    let ssrc = 0xCAFEBABE;
    let seq = 0x1234;
    let mut sender = keyed(true, ssrc, seq);
    let mut packet = rtp_packet(ssrc, seq, &[0xAB, 0xCD]);
    sender.transform(&mut packet).unwrap();

    let mut receiver = keyed(false, ssrc, seq);
    let mut first = packet.clone();
    assert!(receiver.reverse_transform(&mut first).unwrap());

    let mut second = packet.clone();
    assert!(!receiver.reverse_transform(&mut second).unwrap());
}

#[test]
fn roc_wraps_on_sequence_number_rollover() {
    let ssrc = 0xCAFEBABE;
    let mut sender = keyed(true, ssrc, 0xFFFE);
    let mut receiver = keyed(false, ssrc, 0xFFFE);

    for seq in [0xFFFEu16, 0xFFFF, 0x0000, 0x0001] {
        let mut packet = rtp_packet(ssrc, seq, &[0x01, 0x02]);
        assert!(sender.transform(&mut packet).unwrap());
        assert!(receiver.reverse_transform(&mut packet).unwrap());
    }

    assert_eq!(sender.roc, 1);
    assert_eq!(receiver.roc, 1);
}

#[test]
fn out_of_order_packets_within_window_are_accepted() {
    let ssrc = 0xCAFEBABE;
    let mut sender = keyed(true, ssrc, 100);
    let mut receiver = keyed(false, ssrc, 100);

    let mut packets: Vec<Vec<u8>> = [100u16, 101, 102, 103]
        .iter()
        .map(|&seq| {
            let mut p = rtp_packet(ssrc, seq, &[0xAA]);
            sender.transform(&mut p).unwrap();
            p
        })
        .collect();

    // deliver out of order: 100, 102, 101, 103
    packets.swap(1, 2);
    for mut p in packets {
        assert!(receiver.reverse_transform(&mut p).unwrap());
    }
}

#[test]
fn packet_older_than_replay_window_is_dropped() {
    let ssrc = 0xCAFEBABE;
    let mut receiver = keyed(false, ssrc, 0);
    // simulate having already advanced far past the replay window
    receiver.s_l = 1000;
    receiver.roc = 0;
    receiver.seq_num_set = true;
    receiver.replay.update(1000);

    let mut sender = keyed(true, ssrc, 100);
    let mut packet = rtp_packet(ssrc, 100, &[0x01]);
    sender.transform(&mut packet).unwrap();

    assert!(!receiver.reverse_transform(&mut packet).unwrap());
}

#[test]
fn tampered_payload_fails_authentication() {
    let ssrc = 0xCAFEBABE;
    let mut sender = keyed(true, ssrc, 1);
    let mut receiver = keyed(false, ssrc, 1);
    let mut packet = rtp_packet(ssrc, 1, &[0x01, 0x02, 0x03, 0x04]);
    sender.transform(&mut packet).unwrap();

    let last = packet.len() - 1;
    packet[last] ^= 0xFF;

    assert!(!receiver.reverse_transform(&mut packet).unwrap());
}

#[test]
fn derive_session_keys_zeroes_its_own_master_key_copy() {
    let mut ctx = keyed(true, 0xCAFEBABE, 0);
    assert!(ctx.master_key.is_empty());
    assert_eq!(ctx.state, ContextState::Keyed);
    ctx.close();
    assert!(ctx.master_salt.is_empty());
    assert_eq!(ctx.state, ContextState::Closed);
}

#[test]
fn closed_context_rejects_further_transforms() {
    let ssrc = 0xCAFEBABE;
    let mut ctx = keyed(true, ssrc, 0);
    ctx.close();
    let mut packet = rtp_packet(ssrc, 0, &[0x01]);
    assert!(matches!(ctx.transform(&mut packet), Err(Error::ContextClosed)));
}
