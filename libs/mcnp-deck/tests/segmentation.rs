use mcnp_deck::{
    segment, BlockKind, CardKind, CardSegmenter, Deck, DeckError, LineEnding, SegmentOptions,
};
use proptest::prelude::*;

fn rebuild(text: &str) -> String {
    let seg = segment(text, &SegmentOptions::default()).unwrap();
    seg.ranges().into_iter().map(|r| &text[r]).collect()
}

#[test]
fn crlf_deck_keeps_line_numbers() {
    let text = "title\r\n1 0 -1\r\n\r\n1 so 2\r\n\r\nnps 5\r\n";
    let deck = Deck::parse(text).unwrap();
    assert_eq!(deck.segmentation().line_ending, LineEnding::CrLf);
    let surfaces: Vec<_> = deck.surface_cards().collect::<Result<_, _>>().unwrap();
    assert_eq!(surfaces[0].0.line, 4);
    assert_eq!(rebuild(text), text);
}

#[test]
fn continue_run_deck_is_a_single_data_block() {
    let text = "message: runtpe=r\n\nnps 100\nprint\n";
    let deck = Deck::parse(text).unwrap();
    let kinds: Vec<_> = deck.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(kinds, [BlockKind::Message, BlockKind::Data]);
    assert_eq!(deck.data_cards().count(), 2);
}

#[test]
fn trailing_text_after_data_block_is_kept_as_trailer() {
    let text = "t\n1 0 -1\n\n1 so 1\n\nnps 1\n\nleftover notes\n";
    let deck = Deck::parse(text).unwrap();
    let trailer = deck.segmentation().trailer.clone().unwrap();
    assert_eq!(&text[trailer], "leftover notes\n");
    assert_eq!(rebuild(text), text);
}

#[test]
fn card_fields_serialize_to_json() {
    let deck = Deck::parse("t\n5 1 -2.7 -1 imp:n=1\n\n*1 so 3\n\nnps 1\n").unwrap();

    let (_, cell) = deck.cell_cards().next().unwrap().unwrap();
    let json = serde_json::to_value(&cell).unwrap();
    assert_eq!(json["name"], 5);
    assert_eq!(json["geometry"], "-1");

    let (card, surface) = deck.surface_cards().next().unwrap().unwrap();
    let json = serde_json::to_value(&surface).unwrap();
    assert_eq!(json["name"]["id"], 1);
    assert_eq!(json["name"]["marker"], "reflective");
    assert_eq!(json["kind"], "so");
    assert_eq!(json["params"][0], 3.0);
    assert_eq!(serde_json::to_value(&card).unwrap()["kind"], "card");
}

#[test]
fn starting_at_surface_block() {
    let text = "1 so 1\n2 pz 0\n\nm1 1001 1\n";
    let deck = Deck::with_options(text, &SegmentOptions::starting_at(BlockKind::Surface)).unwrap();
    assert_eq!(deck.surface_cards().count(), 2);
    assert_eq!(deck.data_cards().count(), 1);
    assert!(deck.block_text(BlockKind::Cell).is_none());
}

#[test]
fn empty_document_is_a_boundary_error() {
    let err = Deck::parse("  \n\n").unwrap_err();
    assert!(matches!(err, DeckError::BlockBoundary { .. }));
}

#[test]
fn malformed_cell_card_reports_its_line() {
    let text = "t\n1 0 -1\nc note\n2 foo -1\n\n1 so 1\n\nnps 1\n";
    let deck = Deck::parse(text).unwrap();
    let err = deck.cell_cards().find_map(Result::err).unwrap();
    assert_eq!(err.line(), 4);
}

#[test]
fn segmenter_stops_early() {
    let block = "1 0 -1\n2 0 1\n3 0 2\n";
    let first: Vec<_> = CardSegmenter::new(block, LineEnding::Lf, 1).take(1).collect();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].lines, ["1 0 -1"]);
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("c comment".to_string()),
        Just("C".to_string()),
        Just("1 0 -1 imp:n=1".to_string()),
        Just("     2 3".to_string()),
        Just("4 so 1.5 &".to_string()),
        Just("message: x=y".to_string()),
        "[0-9a-z :()#$-]{1,20}",
    ]
}

proptest! {
    #[test]
    fn prop_ranges_cover_document(lines in prop::collection::vec(line_strategy(), 1..30)) {
        let text = lines.join("\n");
        prop_assume!(!text.trim().is_empty());
        if let Ok(seg) = segment(&text, &SegmentOptions::default()) {
            let rebuilt: String = seg.ranges().into_iter().map(|r| &text[r]).collect();
            prop_assert_eq!(rebuilt, text.clone());
        }
    }

    #[test]
    fn prop_every_line_lands_in_one_group(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let block: String = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| format!("{l}\n"))
            .collect();
        let groups: Vec<_> = CardSegmenter::new(&block, LineEnding::Lf, 1).collect();
        let total: usize = groups.iter().map(|g| g.lines.len()).sum();
        prop_assert_eq!(total, block.lines().count());
        for pair in groups.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
            prop_assert!(!(pair[0].kind == CardKind::Comment && pair[1].kind == CardKind::Comment));
        }
    }
}
