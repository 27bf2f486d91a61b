//! Copying pages out of source PDFs.

use lopdf::{Document, Object, ObjectId};

use crate::error::Result;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

// Bound on page tree depth, guards against Parent cycles in broken files.
const MAX_TREE_DEPTH: usize = 64;

/// Move every page of `source` into `target`, below the pages node
/// `parent`.
///
/// Source objects are renumbered past the target's highest id first.
/// Inherited attributes are copied onto each page before it is reparented,
/// since the page loses its old ancestors. Returns the new page ids in
/// source reading order.
pub fn import_pages(
    target: &mut Document,
    mut source: Document,
    parent: ObjectId,
) -> Result<Vec<ObjectId>> {
    source.renumber_objects_with(target.max_id + 1);

    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

    for &page_id in &page_ids {
        let inherited: Vec<(&[u8], Object)> = INHERITABLE
            .iter()
            .filter_map(|key| lookup_inherited(&source, page_id, key).map(|value| (*key, value)))
            .collect();

        let page = source.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in inherited {
            if !page.has(key) {
                page.set(key, value);
            }
        }
        if !page.has(b"MediaBox") {
            page.set("MediaBox", letter_media_box());
        }
        page.set("Parent", Object::Reference(parent));
    }

    target.max_id = target.max_id.max(source.max_id);
    target.objects.extend(source.objects);

    Ok(page_ids)
}

/// Find `key` on the page or its closest ancestor that has it.
fn lookup_inherited(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// US Letter, in points.
pub fn letter_media_box() -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ])
}
