/// Events emitted by the tokenizer for visitor consumption.
/// Each visitor implements the methods it cares about; default impls are no-ops.
#[allow(unused_variables)]
pub trait HtmlVisitor {
    /// Called when an opening tag is encountered.
    /// `tag_name`: the name as written, e.g. "div", "Header", "h1"
    /// `offset`: byte offset of the `<`
    fn on_tag_open(&mut self, tag_name: &str, offset: usize) {}

    /// Called when the scan of a document is complete.
    fn on_document_end(&mut self) {}
}
