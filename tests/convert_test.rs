use fairypack::{
    Bounds, DesignNode, ExportOptions, PixelData, TextAlign, TextData, TextRun, UiPackage, convert,
};

const BUILD_ID: &str = "abcdefgh0z";

fn px(seed: u8) -> PixelData {
    PixelData {
        rgba: vec![seed; 16],
        encoded: vec![0x89, 0x50, 0x4e, 0x47, seed],
    }
}

fn image(name: &str, bounds: Bounds, seed: u8) -> DesignNode {
    DesignNode::image(name, bounds, px(seed))
}

fn text_run() -> TextData {
    TextData {
        value: "Hello".to_string(),
        runs: vec![TextRun {
            font: "Arial".to_string(),
            size_pt: 24,
            color: [255, 0, 0, 255],
            align: TextAlign::Center,
        }],
    }
}

fn component_xml(pkg: &UiPackage, name: &str) -> String {
    let record = pkg
        .resource(name)
        .unwrap_or_else(|| panic!("missing resource {name}"));
    String::from_utf8(record.data.clone()).expect("component xml is utf-8")
}

#[test]
fn test_determinism_with_fixed_build_id() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 640, 480),
        vec![
            image("bg", Bounds::new(0, 0, 640, 480), 1),
            DesignNode::group(
                "playBtn",
                Bounds::new(100, 100, 200, 80),
                vec![
                    image("art@up", Bounds::new(100, 100, 200, 80), 2),
                    image("art@down", Bounds::new(100, 100, 200, 80), 3),
                ],
            ),
            DesignNode::text("scoreTxt", Bounds::new(10, 10, 100, 30), text_run()),
        ],
    );

    let a = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let b = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(a.manifest_xml(), b.manifest_xml());
    assert_eq!(a.resources.len(), b.resources.len());
    for (ra, rb) in a.resources.iter().zip(&b.resources) {
        assert_eq!(ra.id, rb.id);
        assert_eq!(ra.name, rb.name);
        assert_eq!(ra.data, rb.data);
    }
}

#[test]
fn test_package_id_is_build_id_head() {
    let tree = DesignNode::group("home", Bounds::new(0, 0, 10, 10), vec![]);
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    assert_eq!(pkg.id, "abcdefgh");
    // top-level component sits at the package root
    let root = pkg.resource("home.xml").expect("root component");
    assert_eq!(root.path, "/");
}

#[test]
fn test_identical_art_is_deduplicated() {
    let bounds = Bounds::new(0, 0, 32, 32);
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![
            image("left", bounds, 7),
            image("right", Bounds::new(50, 0, 32, 32), 7),
            image("other", Bounds::new(0, 50, 32, 32), 8),
        ],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();

    // two distinct payloads -> two image records, despite three placements
    let images: Vec<_> = pkg
        .resources
        .iter()
        .filter(|r| r.path == "/Images/")
        .collect();
    assert_eq!(images.len(), 2);

    let xml = component_xml(&pkg, "home.xml");
    let shared_id = &images
        .iter()
        .find(|r| r.name == "other.png")
        .map(|r| r.id.clone())
        .unwrap();
    // both identical leaves reference the other record's sibling
    let dedup_id = &images
        .iter()
        .find(|r| r.name != "other.png")
        .map(|r| r.id.clone())
        .unwrap();
    assert_ne!(shared_id, dedup_id);
    assert_eq!(xml.matches(&format!("src=\"{dedup_id}\"")).count(), 2);
}

#[test]
fn test_button_single_state_falls_back_to_up() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![DesignNode::group(
            "playBtn",
            Bounds::new(0, 0, 100, 40),
            vec![image("art@up", Bounds::new(0, 0, 100, 40), 1)],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "playBtn.xml");

    assert!(xml.contains(r#"extention="Button""#));
    assert!(xml.contains(r#"<controller name="button" pages="0,up,1,down"/>"#));
    // the lone up image gears onto both pages
    assert!(xml.contains(r#"<gearDisplay controller="button" pages="0,1"/>"#));
    // single-state, non-checkbox buttons get the press-scale effect
    assert!(xml.contains(r#"downEffect="scale""#));
    assert!(xml.contains(r#"downEffectValue="0.95""#));
}

#[test]
fn test_button_two_states_get_disjoint_pages() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![DesignNode::group(
            "playBtn",
            Bounds::new(0, 0, 100, 40),
            vec![
                image("art@up", Bounds::new(0, 0, 100, 40), 1),
                image("art@down", Bounds::new(0, 0, 100, 40), 2),
            ],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "playBtn.xml");

    assert!(xml.contains(r#"<gearDisplay controller="button" pages="0"/>"#));
    assert!(xml.contains(r#"<gearDisplay controller="button" pages="1"/>"#));
    assert!(!xml.contains(r#"pages="0,1""#));
    // two state images: no press-scale effect
    assert!(!xml.contains("downEffect"));
}

#[test]
fn test_checkbox_button_mode_and_initial_state() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![DesignNode::group(
            "soundCheckBtn",
            Bounds::new(0, 0, 40, 40),
            vec![image("art@up", Bounds::new(0, 0, 40, 40), 1)],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();

    let btn_xml = component_xml(&pkg, "soundCheckBtn.xml");
    assert!(btn_xml.contains(r#"<Button mode="Check"/>"#));
    // checkboxes never get the press-scale effect
    assert!(!btn_xml.contains("downEffect"));

    let root_xml = component_xml(&pkg, "home.xml");
    assert!(root_xml.contains(r#"@checked="true""#));
}

#[test]
fn test_button_title_and_icon_capture() {
    let bounds = Bounds::new(0, 0, 120, 48);
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::group(
            "okBtn",
            bounds,
            vec![
                image("bg@up", bounds, 1),
                image("p@icon", Bounds::new(4, 4, 24, 24), 2),
                DesignNode::text("label@title", Bounds::new(30, 8, 80, 30), text_run()),
            ],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();

    // reverse walk: title text first, icon second (resource 0z0), bg third
    let btn_xml = component_xml(&pkg, "okBtn.xml");
    // the icon loader lost its url; the button's icon property drives it now
    assert!(btn_xml.contains("<loader "));
    assert!(!btn_xml.contains("url="));
    // the captured title text stays on the text element
    assert!(btn_xml.contains(r#"text="Hello""#));

    let root_xml = component_xml(&pkg, "home.xml");
    assert!(root_xml.contains(r#"@title="Hello""#));
    assert!(root_xml.contains(r#"@icon="ui://abcdefgh0z0""#));
}

#[test]
fn test_radio_group_pages_and_indices() {
    let bounds = Bounds::new(0, 0, 60, 30);
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::group(
            "mode@RadioGroup",
            Bounds::new(0, 0, 200, 60),
            vec![
                DesignNode::group("easy@RadioBtn", bounds, vec![image("a@up", bounds, 1)]),
                DesignNode::group(
                    "hard@RadioBtn",
                    Bounds::new(0, 30, 60, 30),
                    vec![image("b@up", Bounds::new(0, 30, 60, 30), 2)],
                ),
            ],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let root_xml = component_xml(&pkg, "home.xml");

    // traversal order (reverse of stacking) fixes page order
    assert!(
        root_xml.contains(r#"<controller name="modeRadioGroup" pages="0,hard,1,easy" selected="0"/>"#),
        "{root_xml}"
    );

    // each member is geared to its own page index
    let hard_pos = root_xml.find(r#"id="hard_0z""#).expect("hard placement");
    let easy_pos = root_xml.find(r#"id="easy_0z""#).expect("easy placement");
    assert!(hard_pos < easy_pos);
    assert!(root_xml.contains(r#"@controller="modeRadioGroup""#));
    let hard_slice = &root_xml[hard_pos..easy_pos];
    assert!(hard_slice.contains(r#"@page="0""#));
    let easy_slice = &root_xml[easy_pos..];
    assert!(easy_slice.contains(r#"@page="1""#));

    // radio variant mode on the synthesized button component
    let btn_xml = component_xml(&pkg, "easy.xml");
    assert!(btn_xml.contains(r#"<Button mode="Radio"/>"#));
}

#[test]
fn test_slider_wiring_is_order_independent() {
    let track = Bounds::new(0, 0, 200, 20);
    let handle = Bounds::new(180, 0, 20, 20);

    let bar_first = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::group(
            "volSlider",
            track,
            vec![image("fill@bar", track, 1), image("grip@handle", handle, 2)],
        )],
    );
    let grip_first = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::group(
            "volSlider",
            track,
            vec![image("grip@handle", handle, 2), image("fill@bar", track, 1)],
        )],
    );

    for tree in [&bar_first, &grip_first] {
        let pkg = convert(tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
        let xml = component_xml(&pkg, "volSlider.xml");
        assert!(xml.contains(r#"extention="Slider""#));
        assert!(
            xml.contains(r#"<relation target="bar_0z" sidePair="right-right"/>"#),
            "{xml}"
        );
    }
}

#[test]
fn test_progress_bar_overflow_and_extension_body() {
    let track = Bounds::new(0, 0, 200, 20);
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::group(
            "hpProBar",
            track,
            vec![image("fill@bar", track, 1), image("grip@edge", track, 2)],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "hpProBar.xml");

    assert!(xml.contains(r#"overflow="hidden""#));
    assert!(xml.contains(r#"extention="ProgressBar""#));
    // the extension body shares the slider renderer
    assert!(xml.contains("<Slider/>"));
    assert!(xml.contains(r#"sidePair="right-right""#));
}

#[test]
fn test_opacity_maps_to_alpha() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![
            image("faded", Bounds::new(0, 0, 10, 10), 1).with_opacity(128),
            image("solid", Bounds::new(20, 0, 10, 10), 2),
        ],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "home.xml");

    assert!(xml.contains(r#"alpha="0.50""#));
    assert_eq!(xml.matches("alpha=").count(), 1);
}

#[test]
fn test_text_element_attributes() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::text(
            "scoreTxt",
            Bounds::new(10, 20, 100, 30),
            text_run(),
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "home.xml");

    // the Txt suffix keeps the layer's own name
    assert!(xml.contains(r#"<text id="scoreTxt_0z" name="scoreTxt" text="Hello""#));
    // the 4-unit text inset is compensated for
    assert!(xml.contains(r#"xy="6,16""#));
    assert!(xml.contains(r#"size="108,38""#));
    assert!(xml.contains(r#"align="center""#));
    assert!(xml.contains(r#"vAlign="middle""#));
    assert!(xml.contains(r#"autoSize="none""#));
    assert!(xml.contains(r#"font="Arial""#));
    assert!(xml.contains(r#"fontSize="24""#));
    assert!(xml.contains(r##"color="#ff0000""##));
}

#[test]
fn test_left_alignment_is_implicit() {
    let mut data = text_run();
    data.runs[0].align = TextAlign::Left;
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::text("scoreTxt", Bounds::new(0, 0, 100, 30), data)],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    assert!(!component_xml(&pkg, "home.xml").contains("align=\"left\""));
}

#[test]
fn test_ignore_font_option() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 200, 200),
        vec![DesignNode::text(
            "scoreTxt",
            Bounds::new(0, 0, 100, 30),
            text_run(),
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::IGNORE_FONT, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "home.xml");
    assert!(!xml.contains("font="));
    assert!(xml.contains("fontSize="));
}

#[test]
fn test_nested_component_and_transparent_group() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 300, 300),
        vec![DesignNode::group(
            "decorations",
            Bounds::new(0, 0, 300, 300),
            vec![DesignNode::group(
                "ComHeader",
                Bounds::new(10, 10, 280, 60),
                vec![image("logo", Bounds::new(10, 10, 50, 50), 1)],
            )],
        )],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();

    // the plain group vanishes; the nested component lands in Components/
    let header = pkg.resource("ComHeader.xml").expect("nested component");
    assert_eq!(header.path, "/Components/");
    let root_xml = component_xml(&pkg, "home.xml");
    assert!(root_xml.contains(r#"fileName="ComHeader.xml""#));
    assert!(!root_xml.contains("decorations"));

    // the logo's placement inside the header is relative to the header
    let header_xml = component_xml(&pkg, "ComHeader.xml");
    assert!(header_xml.contains(r#"xy="0,0""#));
}

#[test]
fn test_empty_leaves_produce_no_placement() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![
            DesignNode::empty("guide", Bounds::new(0, 0, 100, 100)),
            image("bg", Bounds::new(0, 0, 100, 100), 1),
        ],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "home.xml");
    assert!(!xml.contains("guide"));
    assert_eq!(xml.matches("<image").count(), 1);
}

#[test]
fn test_icon_leaf_outside_button_becomes_loader() {
    let tree = DesignNode::group(
        "home",
        Bounds::new(0, 0, 100, 100),
        vec![image("p@icon", Bounds::new(0, 0, 24, 24), 1)],
    );
    let pkg = convert(&tree, "home", ExportOptions::NONE, BUILD_ID).unwrap();
    let xml = component_xml(&pkg, "home.xml");
    assert!(xml.contains(r#"<loader id="n1_0z" name="icon" xy="0,0" size="24,24" url="ui://abcdefgh0z0" fileName="p.png"/>"#));
}
