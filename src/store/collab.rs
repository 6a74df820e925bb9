//! Notes and ideas.
//!
//! Both capture author display fields at write time; a later rename of the
//! author does not rewrite existing records. Listings are newest-first.

use chrono::Utc;

use crate::core::{Result, StoreError, ids};
use crate::model::{Idea, NewIdea, NewNote, Note};
use crate::store::LmsStore;

impl LmsStore {
    pub async fn list_notes_for_student(&mut self, student_id: &str) -> Result<Vec<Note>> {
        self.ensure_loaded().await?;
        let mut notes: Vec<Note> = self
            .notes
            .values()
            .filter(|note| note.student_id == student_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    pub async fn add_note(&mut self, new: NewNote) -> Result<Note> {
        self.ensure_loaded().await?;
        let author = self
            .users
            .get(&new.author_id)
            .ok_or_else(|| StoreError::Invalid("Author not found".to_string()))?;
        let note = Note {
            id: ids::serial_id(&self.notes, "note-"),
            student_id: new.student_id,
            author_id: new.author_id.clone(),
            author_name: author.name.clone(),
            content: new.content,
            created_at: Utc::now().to_rfc3339(),
        };
        self.notes.insert(note.id.clone(), note.clone());
        self.persist().await?;
        Ok(note)
    }

    pub async fn delete_note(&mut self, note_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.notes.remove(note_id).is_none() {
            return Err(StoreError::NotFound("Note not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }

    pub async fn list_ideas(&mut self) -> Result<Vec<Idea>> {
        self.ensure_loaded().await?;
        let mut ideas: Vec<Idea> = self.ideas.values().cloned().collect();
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ideas)
    }

    /// The submitting student is looked up in the user table (that is where
    /// the display name and avatar live) and denormalized onto the idea.
    pub async fn add_idea(&mut self, new: NewIdea) -> Result<Idea> {
        self.ensure_loaded().await?;
        let student = self
            .users
            .get(&new.student_id)
            .ok_or_else(|| StoreError::Invalid("Student not found".to_string()))?;
        let idea = Idea {
            id: ids::serial_id(&self.ideas, "idea-"),
            student_id: new.student_id.clone(),
            student_name: student.name.clone(),
            student_avatar_url: student.avatar_url.clone(),
            title: new.title,
            content: new.content,
            created_at: Utc::now().to_rfc3339(),
        };
        self.ideas.insert(idea.id.clone(), idea.clone());
        self.persist().await?;
        Ok(idea)
    }

    pub async fn delete_idea(&mut self, idea_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.ideas.remove(idea_id).is_none() {
            return Err(StoreError::NotFound("Idea not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }
}
