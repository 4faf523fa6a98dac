use super::*;

fn sample_rtp() -> Vec<u8> {
    let mut p = vec![0u8; 12 + 4];
    p[0] = 0x80; // version 2, no extension, 0 CSRCs
    p[1] = 96;
    rtp_write_seq(&mut p, 0x1234);
    p[8..12].copy_from_slice(&0xCAFEBABEu32.to_be_bytes());
    p[12..16].copy_from_slice(b"abcd");
    p
}

fn rtp_write_seq(buf: &mut [u8], seq: u16) {
    buf[2..4].copy_from_slice(&seq.to_be_bytes());
}

#[test]
fn rtp_header_fields_round_trip() {
    let p = sample_rtp();
    assert_eq!(rtp::version(&p), 2);
    assert!(!rtp::has_extension(&p));
    assert_eq!(rtp::csrc_count(&p), 0);
    assert_eq!(rtp::sequence_number(&p), 0x1234);
    assert_eq!(rtp::ssrc(&p), 0xCAFEBABE);
    assert_eq!(rtp::header_length(&p).unwrap(), 12);
    assert_eq!(rtp::payload_length(&p).unwrap(), 4);
}

#[test]
fn rtp_header_length_accounts_for_csrcs_and_extension() {
    let mut p = vec![0u8; 12 + 8 + 4 + 8];
    p[0] = 0x82; // version 2, extension bit set, 2 CSRCs
    p[12 + 8 + 2..12 + 8 + 4].copy_from_slice(&2u16.to_be_bytes()); // 2 extension words
    assert_eq!(rtp::header_length(&p).unwrap(), 12 + 8 + 4 + 8);
}

#[test]
fn rtp_header_length_rejects_truncated_packet() {
    let p = vec![0x80u8, 96, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    assert!(rtp::header_length(&p).is_err());
}

#[test]
fn rtcp_ssrc_and_index_field_round_trip() {
    let mut p = vec![0u8; 8];
    p[0] = 0x80;
    p[1] = 200;
    p[4..8].copy_from_slice(&0xDEADBEEFu32.to_be_bytes());
    assert_eq!(rtcp::ssrc(&p).unwrap(), 0xDEADBEEF);

    p.extend_from_slice(&rtcp::encode_index_and_flag(0x0000_0007, true));
    let (index, e_flag) = rtcp::read_index_and_flag(&p, 0).unwrap();
    assert_eq!(index, 7);
    assert!(e_flag);
}

#[test]
fn rtcp_index_field_without_e_flag() {
    let field = rtcp::encode_index_and_flag(42, false);
    let mut p = vec![0u8; 8];
    p.extend_from_slice(&field);
    let (index, e_flag) = rtcp::read_index_and_flag(&p, 0).unwrap();
    assert_eq!(index, 42);
    assert!(!e_flag);
}
