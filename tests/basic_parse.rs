//! Whole-tree integration scenarios (spec §8), built from synthetic byte
//! buffers the way the teacher's `tests/basic_parse.rs` does, rather than
//! shipping binary fixtures.

use isobmff::fourcc::fourcc;
use isobmff::node::BoxBody;
use isobmff::parser::Parser;

fn boxed(name: &[u8; 4], payload: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    let total = 8 + payload.len() as u32;
    out.extend_from_slice(&total.to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(&payload);
    out
}

fn container(name: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    let payload: Vec<u8> = children.iter().flatten().copied().collect();
    boxed(name, payload)
}

fn full_box_header(version: u8, flags: u32) -> Vec<u8> {
    let mut v = vec![version];
    v.extend_from_slice(&flags.to_be_bytes()[1..]);
    v
}

fn tkhd() -> Vec<u8> {
    let mut p = full_box_header(0, 0);
    p.extend_from_slice(&0u32.to_be_bytes()); // creation_time
    p.extend_from_slice(&0u32.to_be_bytes()); // modification_time
    p.extend_from_slice(&1u32.to_be_bytes()); // track_id
    p.extend_from_slice(&0u32.to_be_bytes()); // reserved
    p.extend_from_slice(&1000u32.to_be_bytes()); // duration
    p.extend_from_slice(&[0u8; 8]); // reserved x2
    p.extend_from_slice(&0u16.to_be_bytes()); // layer
    p.extend_from_slice(&0u16.to_be_bytes()); // alternate_group
    p.extend_from_slice(&0u16.to_be_bytes()); // volume
    p.extend_from_slice(&0u16.to_be_bytes()); // reserved
    for v in [0x0001_0000u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
        p.extend_from_slice(&v.to_be_bytes());
    }
    p.extend_from_slice(&0u32.to_be_bytes()); // width
    p.extend_from_slice(&0u32.to_be_bytes()); // height
    boxed(b"tkhd", p)
}

fn hdlr() -> Vec<u8> {
    let mut p = full_box_header(0, 0);
    p.extend_from_slice(&0u32.to_be_bytes()); // pre_defined
    p.extend_from_slice(b"vide"); // handler_type
    p.extend_from_slice(&[0u8; 12]); // reserved x3
    p.push(0); // empty NUL-terminated name
    boxed(b"hdlr", p)
}

fn mdhd() -> Vec<u8> {
    let mut p = full_box_header(0, 0);
    p.extend_from_slice(&0u32.to_be_bytes());
    p.extend_from_slice(&0u32.to_be_bytes());
    p.extend_from_slice(&90000u32.to_be_bytes());
    p.extend_from_slice(&1000u32.to_be_bytes());
    let packed = (5u16 << 10) | (14u16 << 5) | 7u16; // "eng"
    p.extend_from_slice(&packed.to_be_bytes());
    p.extend_from_slice(&0u16.to_be_bytes());
    boxed(b"mdhd", p)
}

fn stsd_with_avc1() -> Vec<u8> {
    let mut entry = vec![0u8; 6]; // reserved
    entry.extend_from_slice(&1u16.to_be_bytes()); // data_reference_index
    entry.extend_from_slice(&0u16.to_be_bytes());
    entry.extend_from_slice(&0u16.to_be_bytes());
    entry.extend_from_slice(&[0u8; 12]);
    entry.extend_from_slice(&1920u16.to_be_bytes());
    entry.extend_from_slice(&1080u16.to_be_bytes());
    entry.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    entry.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    entry.extend_from_slice(&0u32.to_be_bytes());
    entry.extend_from_slice(&1u16.to_be_bytes());
    entry.push(0); // empty compressor name
    entry.extend_from_slice(&[0u8; 31]);
    entry.extend_from_slice(&24u16.to_be_bytes());
    entry.extend_from_slice(&0xFFFFu16.to_be_bytes());
    let avc1 = boxed(b"avc1", entry);

    let mut p = full_box_header(0, 0);
    p.extend_from_slice(&1u32.to_be_bytes()); // entry_count
    p.extend_from_slice(&avc1);
    boxed(b"stsd", p)
}

fn sample_mp4() -> Vec<u8> {
    let ftyp = boxed(b"ftyp", {
        let mut p = b"isom".to_vec();
        p.extend_from_slice(&0u32.to_be_bytes());
        p.extend_from_slice(b"isom");
        p
    });

    let stbl = container(b"stbl", &[stsd_with_avc1()]);
    let minf = container(b"minf", &[stbl]);
    let mdia = container(b"mdia", &[hdlr(), mdhd(), minf]);
    let trak = container(b"trak", &[tkhd(), mdia]);
    let moov = container(b"moov", &[trak]);

    let mut out = ftyp;
    out.extend_from_slice(&moov);
    out
}

#[test]
fn walks_moov_trak_mdia_stbl_stsd() {
    let bytes = sample_mp4();
    let parser = Parser::new();
    let root = parser.parse_bytes(bytes).unwrap();

    let moov = root.child(fourcc(b"moov")).expect("moov");
    let trak = moov.child(fourcc(b"trak")).expect("trak");
    assert!(trak.typed_child::<isobmff::boxes::Tkhd>(fourcc(b"tkhd")).is_some());

    let mdia = trak.child(fourcc(b"mdia")).expect("mdia");
    let hdlr = mdia.typed_child::<isobmff::boxes::Hdlr>(fourcc(b"hdlr")).expect("hdlr");
    assert_eq!(hdlr.handler_type.as_str_lossy(), "vide");

    let mdhd = mdia.typed_child::<isobmff::boxes::Mdhd>(fourcc(b"mdhd")).expect("mdhd");
    assert_eq!(mdhd.language, "eng");
    assert_eq!(mdhd.timescale, 90000);

    let minf = mdia.child(fourcc(b"minf")).expect("minf");
    let stbl = minf.child(fourcc(b"stbl")).expect("stbl");
    let stsd = stbl.typed_child::<isobmff::boxes::Stsd>(fourcc(b"stsd")).expect("stsd");
    assert_eq!(stsd.entry_count, 1);

    // regression: Stsd's children must be reachable through the generic
    // Node::children() walk, not just through its own `children` field.
    let stsd_node = stbl.child(fourcc(b"stsd")).expect("stsd node");
    assert_eq!(stsd_node.children().len(), 1);
    let avc1 = stsd_node.child(fourcc(b"avc1")).expect("avc1 child reachable via Node::children()");
    let BoxBody::SampleEntry(entry) = &avc1.body else { panic!("expected sample entry") };
    assert_eq!(entry.data_reference_index, 1);
}

#[test]
fn ftyp_precedes_moov_at_top_level() {
    let bytes = sample_mp4();
    let parser = Parser::new();
    let root = parser.parse_bytes(bytes).unwrap();
    let names: Vec<String> = root.children().iter().map(|n| n.name().as_str_lossy()).collect();
    assert_eq!(names, vec!["ftyp", "moov"]);
}

#[test]
fn unrecognised_root_fourcc_is_not_iso_media_file() {
    let bytes = vec![0x00, 0x00, 0x00, 0x08, b'X', b'X', b'X', b'X'];
    let parser = Parser::new();
    let err = parser.parse_bytes(bytes).unwrap_err();
    assert_eq!(err.kind(), isobmff::error::ErrorKind::NotISOMediaFile);
}

#[test]
fn dref_children_are_reachable() {
    let mut url_payload = vec![0u8]; // version
    url_payload.extend_from_slice(&[0x00, 0x00, 0x01]); // flags = self-contained
    let url = boxed(b"url ", url_payload);

    let mut dref_payload = full_box_header(0, 0);
    dref_payload.extend_from_slice(&1u32.to_be_bytes()); // entry_count
    dref_payload.extend_from_slice(&url);
    let dref = boxed(b"dref", dref_payload);

    let dinf = container(b"dinf", &[dref]);
    let ftyp = boxed(b"ftyp", {
        let mut p = b"isom".to_vec();
        p.extend_from_slice(&0u32.to_be_bytes());
        p
    });
    let mut bytes = ftyp;
    bytes.extend_from_slice(&container(b"moov", &[dinf]));

    let parser = Parser::new();
    let root = parser.parse_bytes(bytes).unwrap();
    let moov = root.child(fourcc(b"moov")).unwrap();
    let dinf = moov.child(fourcc(b"dinf")).unwrap();
    let dref = dinf.child(fourcc(b"dref")).unwrap();
    assert_eq!(dref.children().len(), 1);
    assert_eq!(dref.children()[0].name().as_str_lossy(), "url ");
}
