use std::fs;

use docdata_publish::xml::PublishOptions;
use docdata_publish::{
    PublishError, Result, from_json_file, from_json_str, to_xml_string_with_options,
};

fn bare() -> PublishOptions {
    PublishOptions::default().xml_declaration(false)
}

#[test]
fn test_json_describes_concrete_scenario() -> Result<()> {
    let tree = from_json_str(
        r#"{
            "date": "1776-07-04",
            "flag": true,
            "items": [{"name": "a"}, {"name": "b"}]
        }"#,
    )?;

    let xml = to_xml_string_with_options(&tree, &bare())?;

    let expected = "\
<data>
    <date>1776-07-04</date>
    <flag>true</flag>
    <items>
        <name>a</name>
    </items>
    <items>
        <name>b</name>
    </items>
</data>";
    assert_eq!(xml, expected);

    Ok(())
}

#[test]
fn test_json_single_object_is_one_child() -> Result<()> {
    let tree = from_json_str(r#"{"address": {"city": "Philadelphia", "zip": 19106}}"#)?;

    let xml = to_xml_string_with_options(&tree, &bare())?;
    assert_eq!(
        xml,
        "<data>\n    <address>\n        <city>Philadelphia</city>\n        \
         <zip>19106</zip>\n    </address>\n</data>"
    );

    Ok(())
}

#[test]
fn test_json_file_with_relative_image() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("data"))?;
    fs::write(dir.path().join("data").join("plot.jpg"), b"GIF8")?;
    fs::write(
        dir.path().join("tree.json"),
        r#"{"message": "hello", "picture": {"$image": "data/plot.jpg"}}"#,
    )?;

    let tree = from_json_file(dir.path().join("tree.json"))?;
    let xml = to_xml_string_with_options(&tree, &bare())?;

    assert_eq!(
        xml,
        "<data>\n    <message>hello</message>\n    <picture>R0lGOA==</picture>\n</data>"
    );

    Ok(())
}

#[test]
fn test_json_file_with_missing_image_fails_on_publish() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tree.json");
    fs::write(&path, r#"{"picture": {"$image": "absent.png"}}"#)?;

    let tree = from_json_file(&path)?;
    let err = to_xml_string_with_options(&tree, &bare()).unwrap_err();
    assert!(matches!(err, PublishError::ImageRead { ref key, .. } if key == "picture"));

    Ok(())
}

#[test]
fn test_json_missing_file() {
    let err = from_json_file("/nonexistent/docdata/tree.json")
        .err()
        .expect("expected an error");
    assert!(matches!(err, PublishError::Io(_)));
}

#[test]
fn test_json_array_is_flattened() -> Result<()> {
    let tree = from_json_str(r#"[{"a": "1"}, [{"b": "2"}, {"c": "3"}]]"#)?;

    let xml = to_xml_string_with_options(&tree, &bare().indent(0))?;
    assert_eq!(xml, "<data><a>1</a><b>2</b><c>3</c></data>");

    Ok(())
}

#[test]
fn test_json_image_reference_cannot_repeat() {
    let err = from_json_str(r#"{"pictures": [{"$base64": "R0lGOA=="}]}"#)
        .err()
        .expect("expected an error");
    assert!(matches!(
        err,
        PublishError::InvalidDescription { ref key, .. } if key == "$.pictures[0]"
    ));
}
