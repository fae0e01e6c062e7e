use langtree::TreeError;
use langtree::pipeline::{PipelineConfig, SearchResult, process_search};
use langtree::view::{PublishOutcome, TreeView};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn load_fixture() -> SearchResult {
    let path = Path::new("tests").join("fixtures").join("search_result.json");
    SearchResult::from_reader(BufReader::new(File::open(path).unwrap())).unwrap()
}

#[test]
fn test_search_result_fixture() {
    let result = load_fixture();
    assert_eq!(result.final_result.len(), 3);
    assert_eq!(result.final_result[0].name.as_deref(), Some("Germanic"));
    assert_eq!(result.isocodes.len(), 6);
    assert_eq!(result.code_count, 4.0);
    assert_eq!(result.scores().get("eng"), Some(4.0));
}

#[test]
fn test_trees_are_processed_independently() {
    let result = load_fixture();
    let outcomes = process_search(&result, &PipelineConfig::default());
    assert_eq!(outcomes.len(), 3);

    let germanic = outcomes[0].as_ref().unwrap();
    assert_eq!(germanic.index, 0);
    assert_eq!(germanic.tree.leaf_names(), vec!["deu", "nld", "eng", "dan"]);
    assert_eq!(germanic.rendered.markers.len(), 4);
    assert_eq!(germanic.rendered.name.as_deref(), Some("Germanic"));

    // The Romance tree lacks its closing parenthesis and ';'
    match &outcomes[1] {
        Err(TreeError::Parse { tree, .. }) => assert_eq!(*tree, 1),
        other => panic!("expected parse error, got {other:?}"),
    }

    let celtic = outcomes[2].as_ref().unwrap();
    assert_eq!(celtic.tree.leaf_names(), vec!["cym"]);
    let cym = &celtic.rendered.markers[0];
    assert_eq!(cym.fill.to_string(), "hsl(120,100%,50%)");
}

#[test]
fn test_collapse_unary_in_pipeline() {
    let result = load_fixture();
    let config = PipelineConfig::default().with_collapse_unary(true);
    let outcomes = process_search(&result, &config);

    let celtic = outcomes[2].as_ref().unwrap();
    assert_eq!(celtic.tree.to_newick(), "(cym:1.1);");
}

#[test]
fn test_view_keeps_last_search() {
    let result = load_fixture();
    let mut view = TreeView::new();

    let stale = view.begin_search();
    let current = view.begin_search();
    let outcomes = process_search(&result, &PipelineConfig::default());
    assert_eq!(view.publish(current, outcomes), PublishOutcome::Published);
    assert_eq!(view.trees().len(), 2);

    let outcomes = process_search(&result, &PipelineConfig::default());
    assert_eq!(view.publish(stale, outcomes), PublishOutcome::Stale);
    assert_eq!(view.trees().len(), 2);
}
