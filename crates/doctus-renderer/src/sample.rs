//! Built-in sample document.

/// A short document exercising every Doctus extension next to standard
/// markdown. Used by `doctus sample` and as a rendering fixture.
pub const SAMPLE_DOCUMENT: &str = "\
# Doctus sample
## Second level heading
### Third level heading

**bold**, *italic*, ~~struck out~~, `inline code`

!!Alert: read this first!!
&&Warning: double-check the numbers&&

---

**@#898AC4@Checklist:@end@**

- write the draft
- @green@review it@end@
- @red@~~ship it untested~~@end@

[A link](https://example.com)

> Quotes are restyled with a marker and italics.

```python
print([i for i in range(0, 10, 2)])
```

| Syntax | Meaning |
|--------|---------|
| `!!text!!` | alert |
| `&&text&&` | warning |

Term
: Definition list entry

# *@#BBDCE5@Rendered by Doctus@end@*
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_document;

    #[test]
    fn test_sample_renders_every_extension() {
        let html = render_document(SAMPLE_DOCUMENT);
        assert!(html.contains("text-decoration:line-through;"));
        assert!(html.contains("color:#E62727"));
        assert!(html.contains("color:#FFB200"));
        assert!(html.contains("<hr>"));
        assert!(html.contains(r#"<span style="color:#898AC4;">Checklist:</span>"#));
        assert!(html.contains(r#"<span style="color:green;">review it</span>"#));
        assert!(html.contains("&#9632;"));
        assert!(html.contains(r#"class="language-python""#));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_sample_code_spans_stay_literal() {
        let html = render_document(SAMPLE_DOCUMENT);
        assert!(html.contains("<code>!!text!!</code>"));
        assert!(html.contains("<code>&amp;&amp;text&amp;&amp;</code>"));
    }
}
