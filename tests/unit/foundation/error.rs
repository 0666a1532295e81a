use super::*;

#[test]
fn display_includes_taxonomy_prefix() {
    assert_eq!(
        TifoError::validation("bad input").to_string(),
        "validation error: bad input"
    );
    assert_eq!(
        TifoError::template("ragged rows").to_string(),
        "template error: ragged rows"
    );
    assert_eq!(
        TifoError::catalog("no such layout").to_string(),
        "catalog error: no such layout"
    );
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    let inner = anyhow::anyhow!("io exploded");
    let err: TifoError = inner.into();
    assert_eq!(err.to_string(), "io exploded");
}

#[test]
fn result_alias_propagates_with_question_mark() {
    fn inner() -> TifoResult<u32> {
        Err(TifoError::render("nope"))
    }
    fn outer() -> TifoResult<u32> {
        let v = inner()?;
        Ok(v + 1)
    }
    assert!(matches!(outer(), Err(TifoError::Render(_))));
}
