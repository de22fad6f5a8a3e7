use super::*;

#[test]
fn parse_token_section() {
    let json = r#"{
        "fields": [
            { "Tokens": { "tokens": [
                { "name": "WS", "options": {
                    "regex": { "Regex": "\\s+" },
                    "ignore": { "Boolean": true }
                } }
            ] } }
        ]
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let ws = grammar.token("WS").unwrap();
    assert_eq!(ws.options["regex"], OptionValue::Regex(r"\s+".into()));
    assert_eq!(ws.options["ignore"], OptionValue::Boolean(true));
}

#[test]
fn parse_rule_body() {
    let json = r#"{
        "fields": [
            { "Rules": { "rules": [
                { "name": "list", "body": [
                    { "StringLiteral": "[" },
                    { "Named": {
                        "label": "items",
                        "value": { "Element": { "Ref": "item" } },
                        "modifier": "many"
                    } },
                    { "Or": { "branches": [[{ "StringLiteral": "]" }], []] } }
                ] }
            ] } }
        ]
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let list = grammar.rule("list").unwrap();
    assert_eq!(list.body.len(), 3);
    assert!(matches!(
        &list.body[1],
        BodyElement::Named { modifier: Some(Modifier::Many), label: Some(l), .. } if l == "items"
    ));
    assert!(matches!(&list.body[2], BodyElement::Or { branches } if branches[1].is_empty()));
}

#[test]
fn other_field_keeps_only_name() {
    let json = r#"{ "fields": [ { "Other": { "name": "options" } } ] }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.fields[0].name(), "options");
}

#[test]
fn preserves_option_order() {
    let json = r#"{ "fields": [ { "Tokens": { "tokens": [
        { "name": "ID", "options": {
            "z": { "Number": 1 },
            "a": { "IdentifierRef": "x" },
            "m": { "StringLiteral": "y" }
        } }
    ] } } ] }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let keys: Vec<_> = grammar.token("ID").unwrap().options.keys().cloned().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn to_json_round_trips() {
    let grammar = Grammar::new(vec![
        Field::Other {
            name: "name".into(),
        },
        Field::Rules(RulesSection {
            rules: vec![RuleDef::new(
                "pair",
                vec![
                    BodyElement::reference("key"),
                    BodyElement::named(
                        None,
                        NamedValue::Group(vec![
                            BodyElement::literal(":"),
                            BodyElement::reference("value"),
                        ]),
                        Some(Modifier::Optional),
                    ),
                ],
            )],
        }),
    ]);

    let json = grammar.to_json().unwrap();
    assert_eq!(Grammar::from_json(&json).unwrap(), grammar);
}

#[test]
fn unknown_variant_is_json_error() {
    let json = r#"{ "fields": [ { "Imports": { "name": "x" } } ] }"#;

    let err = Grammar::from_json(json).unwrap_err();
    assert!(matches!(err, CodecError::DecodeJson(_)));
    assert!(err.to_string().starts_with("cannot read grammar JSON"));
}
