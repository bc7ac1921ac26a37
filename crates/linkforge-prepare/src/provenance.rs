//! Provenance stamping.

use linkforge_core::{Arena, Sentence};

/// Copies each surviving disjunct's lattice-node set into its connectors.
///
/// Alternative-consistency checks can then read provenance straight from a
/// connector. Returns the number of connectors stamped.
pub fn gword_record_in_connector(sentence: &mut Sentence) -> usize {
    let (words, arena) = sentence.split_mut();
    let Arena {
        disjuncts,
        connectors,
        ..
    } = arena;

    let mut stamped = 0;
    for word in words.iter() {
        let mut cursor = word.disjuncts;
        while let Some(id) = cursor {
            let d = &disjuncts[id];
            for head in [d.left, d.right] {
                let mut link = head;
                while let Some(cid) = link {
                    let c = &mut connectors[cid];
                    c.originating = Some(d.originating);
                    link = c.next;
                    stamped += 1;
                }
            }
            cursor = d.next;
        }
    }
    stamped
}
