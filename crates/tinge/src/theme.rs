//! The built-in default Beamer color theme.

use crate::color::RgbaColor;
use crate::diag::StrResult;
use crate::graph::{Entry, Graph};
use crate::node::Channel::{Bg, Fg};
use crate::node::SourceChannel::{self, Raw};
use crate::node::{DerivedColor, RawColor};

/// Build the default Beamer color theme as an explicit graph.
///
/// Nodes are created strictly in dependency order; each derived color reads
/// its already-resolved sources eagerly, so construction is a single pass.
/// Any unparseable color or miswired channel aborts the whole build.
pub fn default_theme() -> StrResult<Graph> {
    let black = RawColor::new("black", "black")?.into_node();
    let white = RawColor::new("white", "white")?.into_node();
    let red = RawColor::new("red", "red")?.into_node();
    let green = RawColor::new("green", "green")?.into_node();
    let blendedblue = RawColor::from_color(
        "beamer@blendedblue",
        RgbaColor::from_fractions(0.2, 0.2, 0.7)?,
    )
    .into_node();

    let base_colors = Graph::new("base colors").add([
        black.clone(),
        white.clone(),
        red.clone(),
        green.clone(),
        blendedblue.clone(),
    ]);

    let normal_text = DerivedColor::new("normal text")
        .inherit(Fg, &black, Raw)?
        .inherit(Bg, &white, Raw)?
        .into_node();
    let alerted_text =
        DerivedColor::new("alerted text").inherit(Fg, &red, Raw)?.into_node();
    let example_text = DerivedColor::new("example text")
        .inherit_mix(Fg, &[(&black, Raw, 50.0), (&green, Raw, 50.0)])?
        .into_node();

    let structure =
        DerivedColor::new("structure").inherit(Fg, &blendedblue, Raw)?.into_node();

    let background_canvas =
        DerivedColor::new("background canvas").set_parent(&normal_text)?.into_node();
    let background =
        DerivedColor::new("background").set_parent(&background_canvas)?.into_node();

    // Palettes.
    let palette_primary = DerivedColor::new("palette primary")
        .inherit(Fg, &structure, SourceChannel::Fg)?
        .into_node();
    let palette_secondary = DerivedColor::new("palette secondary")
        .inherit_mix(Fg, &[(&black, Raw, 25.0), (&structure, SourceChannel::Fg, 75.0)])?
        .into_node();
    let palette_tertiary = DerivedColor::new("palette tertiary")
        .inherit_mix(Fg, &[(&black, Raw, 50.0), (&structure, SourceChannel::Fg, 50.0)])?
        .into_node();
    let palette_quaternary =
        DerivedColor::new("palette quaternary").inherit(Fg, &black, Raw)?.into_node();
    let palette = Graph::new("palette").add([
        palette_primary.clone(),
        palette_secondary.clone(),
        palette_tertiary.clone(),
        palette_quaternary.clone(),
    ]);

    let sidebar_primary = DerivedColor::new("palette sidebar primary")
        .inherit(Fg, &normal_text, SourceChannel::Fg)?
        .into_node();
    let sidebar_secondary = DerivedColor::new("palette sidebar secondary")
        .inherit(Fg, &structure, SourceChannel::Fg)?
        .into_node();
    let sidebar_tertiary = DerivedColor::new("palette sidebar tertiary")
        .inherit(Fg, &normal_text, SourceChannel::Fg)?
        .into_node();
    let sidebar_quaternary = DerivedColor::new("palette sidebar quaternary")
        .inherit(Fg, &structure, SourceChannel::Fg)?
        .into_node();
    let palette_sidebar = Graph::new("palette sidebar").add([
        sidebar_primary.clone(),
        sidebar_secondary.clone(),
        sidebar_tertiary.clone(),
        sidebar_quaternary.clone(),
    ]);

    // Math.
    let math_text = DerivedColor::new("math text").into_node();
    let math_text_inlined =
        DerivedColor::new("math text inlined").set_parent(&math_text)?.into_node();
    let math_text_displayed =
        DerivedColor::new("math text displayed").set_parent(&math_text)?.into_node();
    let math_normal = DerivedColor::new("normal text in math mode").into_node();
    let math = Graph::new("math").add([
        math_text,
        math_text_inlined,
        math_text_displayed,
        math_normal,
    ]);

    let local_structure =
        DerivedColor::new("local structure").set_parent(&structure)?.into_node();

    // Titles.
    let titlelike = DerivedColor::new("titlelike").set_parent(&structure)?.into_node();
    let title = DerivedColor::new("title").set_parent(&titlelike)?.into_node();
    let title_head_foot = DerivedColor::new("title in head/foot")
        .set_parent(&palette_quaternary)?
        .into_node();
    let title_sidebar = DerivedColor::new("title in sidebar")
        .set_parent(&sidebar_quaternary)?
        .into_node();
    let subtitle = DerivedColor::new("subtitle").set_parent(&title)?.into_node();
    let frametitle = DerivedColor::new("frametitle").set_parent(&titlelike)?.into_node();
    let framesubtitle =
        DerivedColor::new("framesubtitle").set_parent(&frametitle)?.into_node();
    let frametitle_right =
        DerivedColor::new("frametitle right").set_parent(&frametitle)?.into_node();
    let title_group = Graph::new("title").add([
        titlelike.clone(),
        title.clone(),
        title_head_foot,
        title_sidebar,
        subtitle,
        frametitle.clone(),
        framesubtitle,
        frametitle_right,
    ]);

    let author = DerivedColor::new("author").into_node();
    let author_head_foot = DerivedColor::new("author in head/foot")
        .set_parent(&palette_primary)?
        .into_node();
    let author_sidebar = DerivedColor::new("author in sidebar")
        .inherit(Fg, &sidebar_tertiary, SourceChannel::Fg)?
        .into_node();
    let author_group =
        Graph::new("author").add([author, author_head_foot, author_sidebar]);

    let institute = DerivedColor::new("institute").into_node();
    let institute_head_foot = DerivedColor::new("institute in head/foot")
        .set_parent(&palette_tertiary)?
        .into_node();
    let institute_sidebar = DerivedColor::new("institute in sidebar")
        .inherit(Fg, &sidebar_tertiary, SourceChannel::Fg)?
        .into_node();
    let institute_group =
        Graph::new("institute").add([institute, institute_head_foot, institute_sidebar]);

    let date = DerivedColor::new("date").into_node();
    let date_head_foot = DerivedColor::new("date in head/foot")
        .set_parent(&palette_secondary)?
        .into_node();
    let date_sidebar = DerivedColor::new("date in sidebar")
        .inherit(Fg, &sidebar_tertiary, SourceChannel::Fg)?
        .into_node();
    let date_group = Graph::new("date").add([date, date_head_foot, date_sidebar]);

    let titlegraphic = DerivedColor::new("titlegraphic").into_node();

    let part_name = DerivedColor::new("part name").into_node();
    let part_title = DerivedColor::new("part title").set_parent(&titlelike)?.into_node();
    let part = Graph::new("part").add([part_name, part_title]);

    // Sectioning.
    let section_name = DerivedColor::new("section name").into_node();
    let section_title =
        DerivedColor::new("section title").set_parent(&titlelike)?.into_node();
    let section_in_toc =
        DerivedColor::new("section in toc").set_parent(&structure)?.into_node();
    let section_in_toc_shaded = DerivedColor::new("section in toc shaded")
        .set_parent(&section_in_toc)?
        .into_node();
    let section_head_foot = DerivedColor::new("section in head/foot")
        .set_parent(&palette_tertiary)?
        .into_node();
    let section_in_sidebar = DerivedColor::new("section in sidebar")
        .set_parent(&sidebar_secondary)?
        .into_node();
    let section_in_sidebar_shaded = DerivedColor::new("section in sidebar shaded")
        .inherit_mix(
            Fg,
            &[
                (&section_in_sidebar, SourceChannel::Fg, 40.0),
                (&section_in_sidebar, SourceChannel::Bg, 60.0),
            ],
        )?
        .into_node();
    let section = Graph::new("section").add([
        section_name,
        section_title,
        section_in_toc.clone(),
        section_in_toc_shaded,
        section_head_foot.clone(),
        section_in_sidebar.clone(),
        section_in_sidebar_shaded.clone(),
    ]);

    let subsection_name = DerivedColor::new("subsection name").into_node();
    let subsection_title =
        DerivedColor::new("subsection title").set_parent(&titlelike)?.into_node();
    let subsection_in_toc = DerivedColor::new("subsection in toc").into_node();
    let subsection_in_toc_shaded = DerivedColor::new("subsection in toc shaded")
        .set_parent(&subsection_in_toc)?
        .into_node();
    let subsection_head_foot = DerivedColor::new("subsection in head/foot")
        .set_parent(&palette_secondary)?
        .into_node();
    let subsection_in_sidebar = DerivedColor::new("subsection in sidebar")
        .set_parent(&sidebar_primary)?
        .into_node();
    let subsection_in_sidebar_shaded = DerivedColor::new("subsection in sidebar shaded")
        .inherit_mix(
            Fg,
            &[
                (&subsection_in_sidebar, SourceChannel::Fg, 40.0),
                (&subsection_in_sidebar, SourceChannel::Bg, 60.0),
            ],
        )?
        .into_node();
    let subsection = Graph::new("subsection").add([
        subsection_name,
        subsection_title,
        subsection_in_toc.clone(),
        subsection_in_toc_shaded,
        subsection_head_foot.clone(),
        subsection_in_sidebar.clone(),
        subsection_in_sidebar_shaded.clone(),
    ]);

    let subsubsection_in_toc = DerivedColor::new("subsubsection in toc")
        .set_parent(&subsection_in_toc)?
        .into_node();
    let subsubsection_in_toc_shaded = DerivedColor::new("subsubsection in toc shaded")
        .set_parent(&subsubsection_in_toc)?
        .into_node();
    let subsubsection_head_foot = DerivedColor::new("subsubsection in head/foot")
        .set_parent(&subsection_head_foot)?
        .into_node();
    let subsubsection_in_sidebar = DerivedColor::new("subsubsection in sidebar")
        .set_parent(&subsection_in_sidebar)?
        .into_node();
    let subsubsection_in_sidebar_shaded =
        DerivedColor::new("subsubsection in sidebar shaded")
            .set_parent(&subsection_in_sidebar_shaded)?
            .into_node();
    let subsubsection = Graph::new("subsubsection").add([
        subsubsection_in_toc,
        subsubsection_in_toc_shaded,
        subsubsection_head_foot,
        subsubsection_in_sidebar,
        subsubsection_in_sidebar_shaded,
    ]);

    let headline = DerivedColor::new("headline").into_node();
    let footline = DerivedColor::new("footline").into_node();

    let sidebar = DerivedColor::new("sidebar").into_node();
    let sidebar_left =
        DerivedColor::new("sidebar left").set_parent(&sidebar)?.into_node();
    let sidebar_right =
        DerivedColor::new("sidebar right").set_parent(&sidebar)?.into_node();
    let sidebar_group =
        Graph::new("sidebar").add([sidebar, sidebar_left, sidebar_right]);

    let logo = DerivedColor::new("logo").set_parent(&palette_secondary)?.into_node();

    let caption = DerivedColor::new("caption").into_node();
    let caption_name =
        DerivedColor::new("caption name").set_parent(&structure)?.into_node();
    let caption_group = Graph::new("caption").add([caption, caption_name]);

    // Navigation.
    let button = DerivedColor::new("button")
        .inherit_mix(
            Bg,
            &[
                (&local_structure, SourceChannel::Fg, 50.0),
                (&local_structure, SourceChannel::Bg, 50.0),
            ],
        )?
        .inherit(Fg, &white, Raw)?
        .into_node();
    let button_border = DerivedColor::new("button border")
        .inherit(Fg, &button, SourceChannel::Bg)?
        .into_node();
    let symbols = DerivedColor::new("symbols")
        .inherit_mix(
            Fg,
            &[
                (&structure, SourceChannel::Fg, 40.0),
                (&structure, SourceChannel::Bg, 60.0),
            ],
        )?
        .into_node();
    let symbols_dimmed = DerivedColor::new("symbols dimmed")
        .inherit_mix(
            Fg,
            &[
                (&structure, SourceChannel::Fg, 20.0),
                (&structure, SourceChannel::Bg, 80.0),
            ],
        )?
        .into_node();
    let mini_frame =
        DerivedColor::new("mini frame").set_parent(&section_head_foot)?.into_node();
    let navigation = Graph::new("navigation").add([
        button.clone(),
        button_border,
        symbols,
        symbols_dimmed,
        mini_frame,
    ]);

    // Blocks.
    let block_body = DerivedColor::new("block body").into_node();
    let block_body_alerted = DerivedColor::new("block body alerted").into_node();
    let block_body_example = DerivedColor::new("block body example").into_node();
    let block_title = DerivedColor::new("block title").set_parent(&structure)?.into_node();
    let block_title_alerted = DerivedColor::new("block title alerted")
        .set_parent(&alerted_text)?
        .into_node();
    let block_title_example = DerivedColor::new("block title example")
        .set_parent(&example_text)?
        .into_node();
    let block = Graph::new("block").add([
        block_body,
        block_body_alerted,
        block_body_example,
        block_title,
        block_title_alerted,
        block_title_example,
    ]);

    // Items.
    let item = DerivedColor::new("item").set_parent(&local_structure)?.into_node();
    let item_projected = DerivedColor::new("item projected")
        .set_parent(&local_structure)?
        .inherit(Fg, &white, Raw)?
        .inherit(Bg, &item, SourceChannel::Fg)?
        .into_node();
    let enumerate_item =
        DerivedColor::new("enumerate item").set_parent(&item)?.into_node();
    let itemize_item = DerivedColor::new("itemize item").set_parent(&item)?.into_node();
    let item_body = DerivedColor::new("itemize/enumerate body").into_node();
    let description_item =
        DerivedColor::new("description item").set_parent(&item)?.into_node();
    let description_body = DerivedColor::new("description body").into_node();
    let bibliography_item =
        DerivedColor::new("bibliography item").set_parent(&item)?.into_node();
    let item_group = Graph::new("item").add([
        item.clone(),
        item_projected.clone(),
        enumerate_item,
        itemize_item,
        item_body,
        description_item,
        description_body,
        bibliography_item,
    ]);

    let subitem = DerivedColor::new("subitem").set_parent(&item)?.into_node();
    let subitem_projected = DerivedColor::new("subitem projected")
        .set_parent(&item_projected)?
        .into_node();
    let enumerate_subitem =
        DerivedColor::new("enumerate subitem").set_parent(&subitem)?.into_node();
    let itemize_subitem =
        DerivedColor::new("itemize subitem").set_parent(&subitem)?.into_node();
    let subitem_body = DerivedColor::new("itemize/enumerate subbody").into_node();
    let subitem_group = Graph::new("subitem").add([
        subitem.clone(),
        subitem_projected.clone(),
        enumerate_subitem,
        itemize_subitem,
        subitem_body,
    ]);

    let subsubitem = DerivedColor::new("subsubitem").set_parent(&subitem)?.into_node();
    let subsubitem_projected = DerivedColor::new("subsubitem projected")
        .set_parent(&subitem_projected)?
        .into_node();
    let enumerate_subsubitem =
        DerivedColor::new("enumerate subsubitem").set_parent(&subsubitem)?.into_node();
    let itemize_subsubitem =
        DerivedColor::new("itemize subsubitem").set_parent(&subsubitem)?.into_node();
    let subsubitem_body = DerivedColor::new("itemize/enumerate subsubbody").into_node();
    let subsubitem_group = Graph::new("subsubitem").add([
        subsubitem,
        subsubitem_projected,
        enumerate_subsubitem,
        itemize_subsubitem,
        subsubitem_body,
    ]);

    // Bibliography entries.
    let bib_author = DerivedColor::new("bibliography entry author")
        .inherit(Fg, &structure, SourceChannel::Fg)?
        .into_node();
    let bib_title = DerivedColor::new("bibliography entry title")
        .inherit(Fg, &normal_text, SourceChannel::Fg)?
        .into_node();
    let bib_location = DerivedColor::new("bibliography entry location")
        .inherit_mix(
            Fg,
            &[
                (&structure, SourceChannel::Fg, 65.0),
                (&structure, SourceChannel::Bg, 35.0),
            ],
        )?
        .into_node();
    let bib_note = DerivedColor::new("bibliography entry note")
        .inherit_mix(
            Fg,
            &[
                (&structure, SourceChannel::Fg, 65.0),
                (&structure, SourceChannel::Bg, 35.0),
            ],
        )?
        .into_node();
    let bibliography =
        Graph::new("bibliography").add([bib_author, bib_title, bib_location, bib_note]);

    let separation_line = DerivedColor::new("separation line").into_node();
    let mut separation_nodes = vec![separation_line.clone()];
    for name in [
        "upper separation line head",
        "middle separation line head",
        "lower separation line head",
        "upper separation line foot",
        "middle separation line foot",
        "lower separation line foot",
    ] {
        separation_nodes
            .push(DerivedColor::new(name).set_parent(&separation_line)?.into_node());
    }
    let separation_group = Graph::new("separation line").add(separation_nodes);

    let abstract_body = DerivedColor::new("abstract").into_node();
    let abstract_title =
        DerivedColor::new("abstract title").set_parent(&structure)?.into_node();
    let abstract_group = Graph::new("abstract").add([abstract_body, abstract_title]);

    let verse = DerivedColor::new("verse").into_node();

    let quotation = DerivedColor::new("quotation").into_node();
    let quote = DerivedColor::new("quote").set_parent(&quotation)?.into_node();
    let quote_group = Graph::new("quote").add([quotation, quote]);

    let page_number = DerivedColor::new("page number in head/foot").into_node();

    let qed_symbol = DerivedColor::new("qed symbol").set_parent(&structure)?.into_node();

    // Notes.
    let note_page = DerivedColor::new("note page")
        .inherit_mix(Bg, &[(&white, Raw, 90.0), (&black, Raw, 10.0)])?
        .inherit(Fg, &black, Raw)?
        .into_node();
    let note_title = DerivedColor::new("note title")
        .inherit_mix(Bg, &[(&white, Raw, 80.0), (&black, Raw, 20.0)])?
        .inherit(Fg, &black, Raw)?
        .into_node();
    let note_date = DerivedColor::new("note date").set_parent(&note_title)?.into_node();
    let note = Graph::new("note").add([note_page, note_title.clone(), note_date]);

    Ok(Graph::new("Beamer color theme : default")
        .add([Entry::from(base_colors)])
        .add([normal_text, alerted_text, example_text, structure])
        .add([background_canvas, background])
        .add([Entry::from(palette), Entry::from(palette_sidebar), Entry::from(math)])
        .add([local_structure])
        .add([
            Entry::from(title_group),
            Entry::from(author_group),
            Entry::from(institute_group),
            Entry::from(date_group),
        ])
        .add([titlegraphic])
        .add([Entry::from(part), Entry::from(section), Entry::from(subsection)])
        .add([Entry::from(subsubsection)])
        .add([headline, footline])
        .add([Entry::from(sidebar_group)])
        .add([logo])
        .add([Entry::from(caption_group), Entry::from(navigation)])
        .add([Entry::from(block)])
        .add([
            Entry::from(item_group),
            Entry::from(subitem_group),
            Entry::from(subsubitem_group),
        ])
        .add([Entry::from(bibliography), Entry::from(separation_group)])
        .add([Entry::from(abstract_group)])
        .add([verse])
        .add([Entry::from(quote_group)])
        .add([page_number, qed_symbol])
        .add([Entry::from(note)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::node::ColorNode;

    fn theme() -> Graph {
        default_theme().unwrap()
    }

    fn node<'a>(graph: &'a Graph, path: &[&str]) -> &'a ColorNode {
        let (last, groups) = path.split_last().unwrap();
        let mut current = graph;
        for name in groups {
            let Some(Entry::Group(inner)) = current.get(name) else {
                panic!("missing group `{name}`");
            };
            current = inner;
        }
        let Some(Entry::Node(node)) = current.get(last) else {
            panic!("missing node `{last}`");
        };
        node
    }

    fn hex(graph: &Graph, path: &[&str], channel: SourceChannel) -> String {
        node(graph, path).get(channel).unwrap().to_hex().to_string()
    }

    #[test]
    fn test_theme_shape() {
        let theme = theme();
        assert_eq!(theme.name(), "Beamer color theme : default");
        assert_eq!(theme.len(), 38);
        assert_eq!(theme.nodes().count(), 121);
    }

    #[test]
    fn test_base_colors() {
        let theme = theme();
        assert_eq!(hex(&theme, &["base colors", "black"], Raw), "#000000ff");
        assert_eq!(hex(&theme, &["base colors", "white"], Raw), "#ffffffff");
        assert_eq!(
            hex(&theme, &["base colors", "beamer@blendedblue"], Raw),
            "#3333b2ff",
        );
    }

    #[test]
    fn test_simple_inheritance() {
        let theme = theme();
        assert_eq!(hex(&theme, &["normal text"], SourceChannel::Fg), "#000000ff");
        assert_eq!(hex(&theme, &["normal text"], SourceChannel::Bg), "#ffffffff");
        assert_eq!(hex(&theme, &["structure"], SourceChannel::Fg), "#3333b2ff");

        // Full-identity chains copy both channels.
        assert_eq!(hex(&theme, &["background"], SourceChannel::Fg), "#000000ff");
        assert_eq!(hex(&theme, &["background"], SourceChannel::Bg), "#ffffffff");
    }

    #[test]
    fn test_blended_channels() {
        let theme = theme();

        // 50/50 of black and green.
        assert_eq!(hex(&theme, &["example text"], SourceChannel::Fg), "#004000ff");

        // 25/75 and 50/50 of black and the structure foreground.
        assert_eq!(
            hex(&theme, &["palette", "palette secondary"], SourceChannel::Fg),
            "#262685ff",
        );
        assert_eq!(
            hex(&theme, &["palette", "palette tertiary"], SourceChannel::Fg),
            "#191959ff",
        );

        // 40/60 of the sidebar section's own foreground and (default
        // transparent) background; the alpha comes from the first component.
        assert_eq!(
            hex(&theme, &["section", "section in sidebar shaded"], SourceChannel::Fg),
            "#141447ff",
        );

        // 80/20 of white and black.
        assert_eq!(hex(&theme, &["note", "note title"], SourceChannel::Bg), "#ccccccff");
    }

    #[test]
    fn test_edge_bookkeeping() {
        let theme = theme();

        assert_eq!(node(&theme, &["example text"]).edges().len(), 2);
        assert!(matches!(
            node(&theme, &["background"]).edges(),
            [Edge::Full { .. }],
        ));

        // `item projected` sets a parent and then re-wires both channels.
        let projected = node(&theme, &["item", "item projected"]);
        assert_eq!(projected.edges().len(), 3);
        assert!(matches!(projected.edges()[0], Edge::Full { .. }));

        // Raw colors record nothing.
        assert!(node(&theme, &["base colors", "red"]).edges().is_empty());
    }

    #[test]
    fn test_markup_contains_every_group() {
        let dot = crate::dot::markup(&theme());
        for group in ["base colors", "palette sidebar", "navigation", "separation line"]
        {
            assert!(dot.contains(&format!("graph [label=\"{group}\"]")));
        }
    }
}
