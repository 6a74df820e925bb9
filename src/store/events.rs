//! Calendar events.

use crate::core::{Result, StoreError, ids};
use crate::model::{CalendarEvent, EventPatch, NewEvent};
use crate::store::LmsStore;

impl LmsStore {
    pub async fn list_events(&mut self) -> Result<Vec<CalendarEvent>> {
        self.ensure_loaded().await?;
        Ok(self.events.values().cloned().collect())
    }

    pub async fn add_event(&mut self, new: NewEvent) -> Result<CalendarEvent> {
        self.ensure_loaded().await?;
        let event = CalendarEvent {
            id: ids::serial_id(&self.events, "event-"),
            title: new.title,
            start: new.start,
            end: new.end,
            course_id: new.course_id,
            description: new.description,
            instructor_id: new.instructor_id,
            instructor_google_meet_id: new.instructor_google_meet_id,
        };
        self.events.insert(event.id.clone(), event.clone());
        self.persist().await?;
        Ok(event)
    }

    pub async fn update_event(
        &mut self,
        event_id: &str,
        patch: EventPatch,
    ) -> Result<CalendarEvent> {
        self.ensure_loaded().await?;
        let event = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| StoreError::NotFound("Event not found".to_string()))?;
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(start) = patch.start {
            event.start = start;
        }
        if let Some(end) = patch.end {
            event.end = end;
        }
        if let Some(course_id) = patch.course_id {
            event.course_id = course_id;
        }
        if let Some(description) = patch.description {
            event.description = Some(description);
        }
        if let Some(instructor_id) = patch.instructor_id {
            event.instructor_id = Some(instructor_id);
        }
        if let Some(meet) = patch.instructor_google_meet_id {
            event.instructor_google_meet_id = Some(meet);
        }
        let updated = event.clone();
        self.persist().await?;
        Ok(updated)
    }

    pub async fn delete_event(&mut self, event_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.events.remove(event_id).is_none() {
            return Err(StoreError::NotFound("Event not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }
}
