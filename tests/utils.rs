use pdfemit::{Document, NodeId, WriteOptions};

/// One parsed `oooooooooo ggggg k` line of an xref section.
#[allow(dead_code)]
#[derive(Debug, PartialEq, Eq)]
pub struct XrefLine {
    pub offset: usize,
    pub generation: u16,
    pub kind: u8,
}

#[allow(dead_code)]
pub fn dump(doc: &mut Document, trailer: NodeId, options: &WriteOptions) -> Vec<u8> {
    let mut output = Vec::new();
    doc.dump(&mut output, trailer, options).expect("dump failed");
    output
}

#[allow(dead_code)]
pub fn uncompressed() -> WriteOptions {
    WriteOptions::builder().compress(false).build()
}

#[allow(dead_code)]
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|window| *window == needle).count()
}

#[allow(dead_code)]
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Returns the `startxref` value and the parsed xref entries.
#[allow(dead_code)]
pub fn parse_xref(output: &[u8]) -> (usize, Vec<XrefLine>) {
    let marker = b"startxref\n";
    let start = output
        .windows(marker.len())
        .rposition(|window| window == marker)
        .expect("missing startxref")
        + marker.len();
    let digits: Vec<u8> = output[start..].iter().copied().take_while(u8::is_ascii_digit).collect();
    let xref_start: usize = std::str::from_utf8(&digits).unwrap().parse().unwrap();

    let section = &output[xref_start..];
    assert!(section.starts_with(b"xref\n0 "), "startxref does not point at the xref keyword");
    let header_end = 7 + section[7..].iter().position(|&b| b == b'\n').unwrap();
    let count: usize = std::str::from_utf8(&section[7..header_end]).unwrap().parse().unwrap();

    let entries = section[header_end + 1..]
        .chunks(20)
        .take(count)
        .map(|line| {
            assert_eq!(&line[18..20], b"\r\n");
            XrefLine {
                offset: std::str::from_utf8(&line[0..10]).unwrap().parse().unwrap(),
                generation: std::str::from_utf8(&line[11..16]).unwrap().parse().unwrap(),
                kind: line[17],
            }
        })
        .collect();
    (xref_start, entries)
}
