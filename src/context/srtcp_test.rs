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

fn template(is_sender: bool) -> SrtcpContext {
    SrtcpContext::new_default(
        master_key(),
        master_salt(),
        Policy::aes_cm_hmac_sha1_80(),
        0,
        true,
        is_sender,
    )
    .unwrap()
}

fn keyed(is_sender: bool, ssrc: u32) -> SrtcpContext {
    let mut ctx = template(is_sender).derive_context(ssrc, 0);
    ctx.derive_session_keys(0).unwrap();
    ctx
}

fn rtcp_packet(ssrc: u32, payload: &[u8]) -> Vec<u8> {
    let mut p = vec![0u8; 8];
    p[0] = 0x80;
    p[1] = 200;
    p[4..8].copy_from_slice(&ssrc.to_be_bytes());
    p.extend_from_slice(payload);
    p
}

#[test]
fn round_trip_preserves_payload_and_advances_index() {
    let ssrc = 0xFEEDFACE;
    let mut sender = keyed(true, ssrc);
    let mut receiver = keyed(false, ssrc);

    let mut p1 = rtcp_packet(ssrc, &[0x01, 0x02]);
    assert!(sender.transform(&mut p1).unwrap());
    assert!(receiver.reverse_transform(&mut p1).unwrap());
    assert_eq!(&p1[8..10], &[0x01, 0x02]);

    let mut p2 = rtcp_packet(ssrc, &[0x03, 0x04]);
    assert!(sender.transform(&mut p2).unwrap());
    assert!(receiver.reverse_transform(&mut p2).unwrap());
    assert_eq!(&p2[8..10], &[0x03, 0x04]);

    assert_eq!(sender.sent_index, 2);
}

#[test]
fn duplicate_index_is_rejected() {
    let ssrc = 0xFEEDFACE;
    let mut sender = keyed(true, ssrc);
    let mut receiver = keyed(false, ssrc);

    let mut packet = rtcp_packet(ssrc, &[0x01]);
    sender.transform(&mut packet).unwrap();

    let mut first = packet.clone();
    assert!(receiver.reverse_transform(&mut first).unwrap());
    let mut second = packet;
    assert!(!receiver.reverse_transform(&mut second).unwrap());
}

#[test]
fn null_encryption_leaves_payload_in_clear_but_still_authenticates() {
    let policy = Policy::null_hmac_sha1_80();
    let mut sender = SrtcpContext::new_default(master_key(), master_salt(), policy, 0, true, true)
        .unwrap()
        .derive_context(0xABCDEF01, 0);
    sender.derive_session_keys(0).unwrap();
    let mut receiver =
        SrtcpContext::new_default(master_key(), master_salt(), policy, 0, true, false)
            .unwrap()
            .derive_context(0xABCDEF01, 0);
    receiver.derive_session_keys(0).unwrap();

    let mut packet = rtcp_packet(0xABCDEF01, &[0xAA, 0xBB]);
    sender.transform(&mut packet).unwrap();
    assert_eq!(&packet[8..10], &[0xAA, 0xBB]); // never encrypted

    assert!(receiver.reverse_transform(&mut packet).unwrap());
    assert_eq!(&packet[8..10], &[0xAA, 0xBB]);
}

#[test]
fn tampered_index_field_fails_authentication() {
    let ssrc = 0xFEEDFACE;
    let mut sender = keyed(true, ssrc);
    let mut receiver = keyed(false, ssrc);

    let mut packet = rtcp_packet(ssrc, &[0x01, 0x02]);
    sender.transform(&mut packet).unwrap();

    let tag_len = 10;
    let index_field_offset = packet.len() - tag_len - 4;
    packet[index_field_offset] ^= 0x01;

    assert!(!receiver.reverse_transform(&mut packet).unwrap());
}

#[test]
fn close_wipes_master_material() {
    let mut ctx = keyed(true, 0xFEEDFACE);
    ctx.close();
    assert!(ctx.master_key.is_empty());
    assert!(ctx.master_salt.is_empty());
    assert!(ctx.salt_key.is_empty());
    assert_eq!(ctx.state, ContextState::Closed);
}
