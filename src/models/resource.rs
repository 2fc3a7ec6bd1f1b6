// src/models/resource.rs
//! Career resource hub: blog posts, internships, career events and job fairs.
//! The catalogue is fixed content shipped with the service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=40&width=40";
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=350";
const PLACEHOLDER_LOGO: &str = "/placeholder.svg?height=48&width=48";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub author_avatar: String,
    pub category: String,
    pub read_time: String,
    pub publish_date: String,
    pub image: String,
    pub featured: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: String,
    pub location: String,
    pub duration: String,
    pub stipend: String,
    pub deadline: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Seminar,
    Bootcamp,
    Workshop,
    Course,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventFormat {
    Online,
    InPerson,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEvent {
    pub id: String,
    pub title: String,
    pub organizer: String,
    pub organizer_logo: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub format: EventFormat,
    pub start_date: String,
    pub end_date: String,
    pub location: Option<String>,
    pub price: String,
    pub description: String,
    pub topics: Vec<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFair {
    pub id: String,
    pub title: String,
    pub organizer: String,
    pub organizer_logo: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub format: EventFormat,
    pub description: String,
    pub companies: Vec<String>,
    pub registration_link: String,
    pub featured: bool,
}

/// Error for a filter value outside its fixed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl EventType {
    pub const ALL: [EventType; 4] = [Self::Seminar, Self::Bootcamp, Self::Workshop, Self::Course];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seminar => "seminar",
            Self::Bootcamp => "bootcamp",
            Self::Workshop => "workshop",
            Self::Course => "course",
        }
    }
}

impl FromStr for EventType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| UnknownValue {
                kind: "event type",
                value: s.to_string(),
            })
    }
}

impl EventFormat {
    pub const ALL: [EventFormat; 3] = [Self::Online, Self::InPerson, Self::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::InPerson => "in-person",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for EventFormat {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| UnknownValue {
                kind: "format",
                value: s.to_string(),
            })
    }
}

/// Which section of the hub a request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTab {
    Blogs,
    Internships,
    Events,
    Fairs,
}

impl FromStr for ResourceTab {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blogs" => Ok(Self::Blogs),
            "internships" => Ok(Self::Internships),
            "events" => Ok(Self::Events),
            "fairs" => Ok(Self::Fairs),
            _ => Err(UnknownValue {
                kind: "tab",
                value: s.to_string(),
            }),
        }
    }
}

/// "all" and the empty string both mean the menu was left unset
fn selected(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Parsed query of the resource hub. Each tab reads only its own menus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    query: String,
    category: Option<String>,
    location: Option<String>,
    event_type: Option<EventType>,
    format: Option<EventFormat>,
}

impl ResourceFilter {
    pub fn new(
        query: Option<&str>,
        category: Option<&str>,
        location: Option<&str>,
        event_type: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, UnknownValue> {
        Ok(Self {
            query: query.map(|q| q.trim().to_lowercase()).unwrap_or_default(),
            category: selected(category).map(str::to_string),
            location: selected(location).map(str::to_lowercase),
            event_type: selected(event_type).map(str::parse::<EventType>).transpose()?,
            format: selected(format).map(str::parse::<EventFormat>).transpose()?,
        })
    }

    fn text_matches(&self, fields: &[&str]) -> bool {
        self.query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&self.query))
    }

    pub fn matches_blog(&self, post: &BlogPost) -> bool {
        self.text_matches(&[post.title.as_str(), post.excerpt.as_str()])
            && self.category.as_deref().map_or(true, |c| c == post.category)
    }

    pub fn matches_internship(&self, internship: &Internship) -> bool {
        self.text_matches(&[internship.title.as_str(), internship.company.as_str()])
            && self
                .location
                .as_deref()
                .map_or(true, |l| internship.location.to_lowercase().contains(l))
    }

    pub fn matches_event(&self, event: &CareerEvent) -> bool {
        self.text_matches(&[event.title.as_str(), event.organizer.as_str()])
            && self.event_type.map_or(true, |t| t == event.event_type)
            && self.format.map_or(true, |f| f == event.format)
    }

    pub fn matches_fair(&self, fair: &JobFair) -> bool {
        self.text_matches(&[fair.title.as_str(), fair.organizer.as_str()]) && self.format.map_or(true, |f| f == fair.format)
    }
}

/// The whole catalogue, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceCatalog {
    pub blogs: Vec<BlogPost>,
    pub internships: Vec<Internship>,
    pub events: Vec<CareerEvent>,
    pub fairs: Vec<JobFair>,
}

impl ResourceCatalog {
    /// Narrow every section with `filter`. With a tab, the other sections come back empty.
    pub fn filtered(&self, tab: Option<ResourceTab>, filter: &ResourceFilter) -> ResourceCatalog {
        let wants = |t: ResourceTab| tab.map_or(true, |selected| selected == t);

        ResourceCatalog {
            blogs: pick(wants(ResourceTab::Blogs), &self.blogs, |b| filter.matches_blog(b)),
            internships: pick(wants(ResourceTab::Internships), &self.internships, |i| {
                filter.matches_internship(i)
            }),
            events: pick(wants(ResourceTab::Events), &self.events, |e| filter.matches_event(e)),
            fairs: pick(wants(ResourceTab::Fairs), &self.fairs, |f| filter.matches_fair(f)),
        }
    }

    /// Distinct blog categories, for the category menu
    pub fn blog_categories(&self) -> Vec<String> {
        distinct(self.blogs.iter().map(|b| b.category.as_str()))
    }

    /// Distinct internship locations, for the location menu
    pub fn internship_locations(&self) -> Vec<String> {
        distinct(self.internships.iter().map(|i| i.location.as_str()))
    }
}

fn pick<T: Clone>(wanted: bool, items: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    if !wanted {
        return Vec::new();
    }
    items.iter().filter(|item| keep(item)).cloned().collect()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn blog(
    id: &str,
    title: &str,
    excerpt: &str,
    author: &str,
    category: &str,
    read_time: &str,
    publish_date: &str,
    featured: bool,
    tags: &[&str],
) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        author: author.to_string(),
        author_avatar: PLACEHOLDER_AVATAR.to_string(),
        category: category.to_string(),
        read_time: read_time.to_string(),
        publish_date: publish_date.to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
        featured,
        tags: strings(tags),
    }
}

/// Shipped catalogue content
pub fn seeded_catalog() -> ResourceCatalog {
    ResourceCatalog {
        blogs: seeded_blogs(),
        internships: seeded_internships(),
        events: seeded_events(),
        fairs: seeded_fairs(),
    }
}

fn seeded_blogs() -> Vec<BlogPost> {
    vec![
        blog(
            "1",
            "10 Tips for Landing Your First Remote Job",
            "Discover proven strategies to help you secure your first remote position in today's competitive job market.",
            "Emma Rodriguez",
            "Career Advice",
            "5 min",
            "May 10, 2023",
            true,
            &["Remote Work", "Job Search", "Career Tips"],
        ),
        blog(
            "2",
            "The Future of Remote Work: Trends to Watch in 2023",
            "Explore emerging remote work trends that are shaping how companies and employees approach virtual collaboration.",
            "Michael Chen",
            "Industry Insights",
            "8 min",
            "April 22, 2023",
            false,
            &["Remote Work", "Future of Work", "Workplace Trends"],
        ),
        blog(
            "3",
            "Building a Standout Remote Work Portfolio",
            "Learn how to showcase your remote work skills and experience to attract top employers in your field.",
            "Sarah Johnson",
            "Portfolio Development",
            "6 min",
            "March 15, 2023",
            false,
            &["Portfolio", "Personal Branding", "Career Development"],
        ),
        blog(
            "4",
            "Remote Work Tools Every Professional Should Master",
            "Discover the essential tools and software that can boost your productivity and collaboration in a remote environment.",
            "David Park",
            "Productivity",
            "7 min",
            "February 28, 2023",
            false,
            &["Tools", "Productivity", "Software"],
        ),
        blog(
            "5",
            "Overcoming Isolation: Building Community in Remote Teams",
            "Strategies for maintaining connection and building strong relationships with colleagues while working remotely.",
            "Priya Sharma",
            "Remote Culture",
            "6 min",
            "January 17, 2023",
            true,
            &["Team Building", "Remote Culture", "Communication"],
        ),
        blog(
            "6",
            "Negotiating Salary for Remote Positions: What You Need to Know",
            "Expert advice on how to navigate salary discussions for remote roles, including factors to consider beyond base pay.",
            "James Wilson",
            "Salary Negotiation",
            "9 min",
            "December 5, 2022",
            false,
            &["Salary", "Negotiation", "Benefits"],
        ),
    ]
}

fn seeded_internships() -> Vec<Internship> {
    let internship = |id: &str,
                      title: &str,
                      company: &str,
                      location: &str,
                      (duration, stipend, deadline): (&str, &str, &str),
                      description: &str,
                      requirements: &[&str],
                      skills: &[&str],
                      featured: bool| Internship {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        company_logo: PLACEHOLDER_LOGO.to_string(),
        location: location.to_string(),
        duration: duration.to_string(),
        stipend: stipend.to_string(),
        deadline: deadline.to_string(),
        description: description.to_string(),
        requirements: strings(requirements),
        skills: strings(skills),
        featured,
    };

    vec![
        internship(
            "1",
            "Remote Software Engineering Intern",
            "TechCorp",
            "Remote (Worldwide)",
            ("3 months", "$2000/month", "June 30, 2023"),
            "Join our engineering team to develop cutting-edge web applications using React and Node.js. You'll work on real projects with experienced mentors.",
            &[
                "Currently pursuing a degree in Computer Science or related field",
                "Knowledge of JavaScript, HTML, and CSS",
                "Basic understanding of React or similar frameworks",
                "Strong problem-solving skills",
            ],
            &["JavaScript", "React", "Node.js", "Git"],
            true,
        ),
        internship(
            "2",
            "Digital Marketing Intern",
            "GrowthLabs",
            "Remote (US Only)",
            ("6 months", "$1500/month", "May 15, 2023"),
            "Assist our marketing team in creating and implementing digital marketing campaigns. Gain hands-on experience with SEO, content marketing, and social media strategy.",
            &[
                "Currently pursuing a degree in Marketing, Communications, or related field",
                "Strong writing and communication skills",
                "Basic understanding of SEO and social media platforms",
                "Creative mindset and attention to detail",
            ],
            &["Content Marketing", "SEO", "Social Media", "Analytics"],
            true,
        ),
        internship(
            "3",
            "UX/UI Design Intern",
            "DesignHub",
            "Remote (Europe)",
            ("4 months", "€1800/month", "May 20, 2023"),
            "Work with our design team to create user-centered designs for web and mobile applications. You'll participate in the entire design process from research to implementation.",
            &[
                "Currently pursuing a degree in Design, HCI, or related field",
                "Portfolio demonstrating UI/UX projects",
                "Proficiency with design tools like Figma or Sketch",
                "Understanding of user-centered design principles",
            ],
            &["UI Design", "UX Research", "Figma", "Prototyping"],
            false,
        ),
        internship(
            "4",
            "Data Science Intern",
            "DataInsights",
            "Remote (Worldwide)",
            ("5 months", "$2200/month", "June 5, 2023"),
            "Join our data science team to analyze large datasets and build predictive models. You'll work on real-world problems and gain experience with machine learning techniques.",
            &[
                "Currently pursuing a degree in Data Science, Statistics, or related field",
                "Experience with Python and data analysis libraries",
                "Basic understanding of machine learning concepts",
                "Strong analytical and problem-solving skills",
            ],
            &["Python", "Machine Learning", "Data Analysis", "SQL"],
            false,
        ),
        internship(
            "5",
            "Content Writing Intern",
            "ContentCraft",
            "Remote (US, UK, Canada)",
            ("3 months", "$1200/month", "May 25, 2023"),
            "Create engaging content for blogs, social media, and marketing materials. Develop your writing skills while working with a team of experienced content creators.",
            &[
                "Currently pursuing a degree in English, Journalism, Communications, or related field",
                "Excellent writing and editing skills",
                "Ability to research and write about various topics",
                "Attention to detail and creativity",
            ],
            &["Content Writing", "Editing", "SEO Writing", "Research"],
            false,
        ),
    ]
}

fn seeded_events() -> Vec<CareerEvent> {
    let event = |id: &str,
                 title: &str,
                 organizer: &str,
                 (event_type, format): (EventType, EventFormat),
                 (start_date, end_date): (&str, &str),
                 location: Option<&str>,
                 price: &str,
                 description: &str,
                 topics: &[&str],
                 featured: bool| CareerEvent {
        id: id.to_string(),
        title: title.to_string(),
        organizer: organizer.to_string(),
        organizer_logo: PLACEHOLDER_LOGO.to_string(),
        event_type,
        format,
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        location: location.map(str::to_string),
        price: price.to_string(),
        description: description.to_string(),
        topics: strings(topics),
        featured,
    };

    vec![
        event(
            "1",
            "Full-Stack Web Development Bootcamp",
            "CodeAcademy",
            (EventType::Bootcamp, EventFormat::Online),
            ("July 10, 2023", "October 2, 2023"),
            None,
            "$1,999",
            "Intensive 12-week bootcamp covering front-end and back-end development. Learn HTML, CSS, JavaScript, React, Node.js, and more. Build a portfolio of projects to showcase to employers.",
            &["HTML/CSS", "JavaScript", "React", "Node.js", "MongoDB", "Express"],
            true,
        ),
        event(
            "2",
            "Remote Work Success Strategies",
            "Future of Work Institute",
            (EventType::Seminar, EventFormat::Online),
            ("June 15, 2023", "June 15, 2023"),
            None,
            "$49",
            "A comprehensive seminar on thriving in remote work environments. Learn productivity techniques, communication strategies, and work-life balance tips from remote work experts.",
            &["Productivity", "Communication", "Work-Life Balance", "Remote Tools"],
            true,
        ),
        event(
            "3",
            "Data Science Fundamentals",
            "DataLab",
            (EventType::Course, EventFormat::Hybrid),
            ("August 5, 2023", "September 30, 2023"),
            Some("New York City + Online"),
            "$1,200",
            "Learn the fundamentals of data science, including statistics, Python programming, data visualization, and machine learning. Suitable for beginners with basic programming knowledge.",
            &["Python", "Statistics", "Data Visualization", "Machine Learning"],
            false,
        ),
        event(
            "4",
            "UX Design Workshop Series",
            "DesignMasters",
            (EventType::Workshop, EventFormat::Online),
            ("July 8, 2023", "July 29, 2023"),
            None,
            "$299",
            "Four-week workshop series covering user research, wireframing, prototyping, and usability testing. Learn practical skills you can immediately apply to your projects.",
            &["User Research", "Wireframing", "Prototyping", "Usability Testing"],
            false,
        ),
        event(
            "5",
            "Leadership Skills for Remote Managers",
            "Management Institute",
            (EventType::Seminar, EventFormat::Online),
            ("June 22, 2023", "June 23, 2023"),
            None,
            "$199",
            "Two-day seminar focused on developing leadership skills for managing remote teams. Learn effective communication, team building, and performance management strategies.",
            &["Leadership", "Team Management", "Communication", "Performance Reviews"],
            false,
        ),
    ]
}

fn seeded_fairs() -> Vec<JobFair> {
    let fair = |id: &str,
                title: &str,
                organizer: &str,
                (date, time): (&str, &str),
                location: &str,
                format: EventFormat,
                description: &str,
                companies: &[&str],
                featured: bool| JobFair {
        id: id.to_string(),
        title: title.to_string(),
        organizer: organizer.to_string(),
        organizer_logo: PLACEHOLDER_LOGO.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        format,
        description: description.to_string(),
        companies: strings(companies),
        registration_link: "#".to_string(),
        featured,
    };

    vec![
        fair(
            "1",
            "Global Remote Work Expo",
            "RemoteFirst Alliance",
            ("July 15-16, 2023", "9:00 AM - 5:00 PM EST"),
            "Virtual Event",
            EventFormat::Online,
            "Connect with top remote-friendly companies from around the world. Attend workshops on remote job searching, interview preparation, and more.",
            &["TechCorp", "InnovateSoft", "DesignHub", "CloudTech", "DataInsights"],
            true,
        ),
        fair(
            "2",
            "Tech Careers Summit",
            "TechHire",
            ("August 5, 2023", "10:00 AM - 4:00 PM PST"),
            "San Francisco Convention Center + Online",
            EventFormat::Hybrid,
            "The largest tech career fair on the West Coast. Meet recruiters from leading tech companies, attend tech talks, and network with industry professionals.",
            &["Google", "Microsoft", "Apple", "Amazon", "Meta", "Salesforce"],
            true,
        ),
        fair(
            "3",
            "Digital Marketing Career Fair",
            "Marketing Professionals Network",
            ("June 28, 2023", "11:00 AM - 3:00 PM EST"),
            "Virtual Event",
            EventFormat::Online,
            "Specialized career fair for marketing professionals. Connect with companies hiring for digital marketing, content creation, SEO, and social media roles.",
            &["GrowthLabs", "ContentCraft", "SocialSphere", "MarketEdge", "BrandBuilders"],
            false,
        ),
        fair(
            "4",
            "Diversity in Tech Job Fair",
            "TechDiversity Coalition",
            ("July 22, 2023", "9:00 AM - 2:00 PM CST"),
            "Chicago Tech Hub + Online",
            EventFormat::Hybrid,
            "Job fair focused on promoting diversity and inclusion in the tech industry. Connect with companies committed to building diverse teams.",
            &["IBM", "Adobe", "Cisco", "Shopify", "Stripe", "Twilio"],
            false,
        ),
        fair(
            "5",
            "Entry-Level & Internship Expo",
            "CareerStart",
            ("August 12, 2023", "10:00 AM - 3:00 PM EST"),
            "Virtual Event",
            EventFormat::Online,
            "Career fair specifically for students, recent graduates, and early-career professionals. Find entry-level positions and internships across various industries.",
            &["TechCorp", "GrowthLabs", "FinanceFirst", "HealthInnovate", "EduTech"],
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(
        query: Option<&str>,
        category: Option<&str>,
        location: Option<&str>,
        event_type: Option<&str>,
        format: Option<&str>,
    ) -> ResourceFilter {
        ResourceFilter::new(query, category, location, event_type, format).unwrap()
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|item| id(item).to_string()).collect()
    }

    #[test]
    fn test_unfiltered_catalog_is_complete() {
        let catalog = seeded_catalog();
        let all = catalog.filtered(None, &ResourceFilter::default());
        assert_eq!(all, catalog);
        assert_eq!(
            (all.blogs.len(), all.internships.len(), all.events.len(), all.fairs.len()),
            (6, 5, 5, 5)
        );
    }

    #[test]
    fn test_tab_limits_sections() {
        let catalog = seeded_catalog();
        let fairs = catalog.filtered(Some(ResourceTab::Fairs), &ResourceFilter::default());
        assert!(fairs.blogs.is_empty() && fairs.internships.is_empty() && fairs.events.is_empty());
        assert_eq!(fairs.fairs.len(), 5);

        assert_eq!("Events".parse::<ResourceTab>(), Ok(ResourceTab::Events));
        assert!("videos".parse::<ResourceTab>().is_err());
    }

    #[test]
    fn test_search_reads_each_section_own_fields() {
        let catalog = seeded_catalog();

        // blog excerpts are searched, internship descriptions are not
        let hits = catalog.filtered(None, &filter(Some("SECURE YOUR FIRST"), None, None, None, None));
        assert_eq!(ids(&hits.blogs, |b| b.id.as_str()), vec!["1"]);
        let hits = catalog.filtered(None, &filter(Some("predictive models"), None, None, None, None));
        assert!(hits.internships.is_empty());

        let hits = catalog.filtered(None, &filter(Some("growthlabs"), None, None, None, None));
        assert_eq!(ids(&hits.internships, |i| i.id.as_str()), vec!["2"]);
        assert!(hits.fairs.is_empty());

        let hits = catalog.filtered(None, &filter(Some("institute"), None, None, None, None));
        assert_eq!(ids(&hits.events, |e| e.id.as_str()), vec!["2", "5"]);

        let hits = catalog.filtered(None, &filter(Some("techhire"), None, None, None, None));
        assert_eq!(ids(&hits.fairs, |f| f.id.as_str()), vec!["2"]);
    }

    #[test]
    fn test_blog_category_is_exact() {
        let catalog = seeded_catalog();
        let hits = catalog.filtered(None, &filter(None, Some("Productivity"), None, None, None));
        assert_eq!(ids(&hits.blogs, |b| b.id.as_str()), vec!["4"]);

        let hits = catalog.filtered(None, &filter(None, Some("productivity"), None, None, None));
        assert!(hits.blogs.is_empty());

        let hits = catalog.filtered(None, &filter(None, Some("all"), None, None, None));
        assert_eq!(hits.blogs.len(), 6);
    }

    #[test]
    fn test_internship_location_is_substring() {
        let catalog = seeded_catalog();
        let hits = catalog.filtered(None, &filter(None, None, Some("worldwide"), None, None));
        assert_eq!(ids(&hits.internships, |i| i.id.as_str()), vec!["1", "4"]);

        let hits = catalog.filtered(None, &filter(None, None, Some("US"), None, None));
        assert_eq!(ids(&hits.internships, |i| i.id.as_str()), vec!["2", "5"]);

        let hits = catalog.filtered(None, &filter(None, None, Some(""), None, None));
        assert_eq!(hits.internships.len(), 5);
    }

    #[test]
    fn test_event_type_and_format() {
        let catalog = seeded_catalog();
        let hits = catalog.filtered(None, &filter(None, None, None, Some("seminar"), None));
        assert_eq!(ids(&hits.events, |e| e.id.as_str()), vec!["2", "5"]);

        let hits = catalog.filtered(None, &filter(None, None, None, Some("course"), Some("online")));
        assert!(hits.events.is_empty());

        let hits = catalog.filtered(None, &filter(None, None, None, Some("all"), Some("hybrid")));
        assert_eq!(ids(&hits.events, |e| e.id.as_str()), vec!["3"]);

        assert!(ResourceFilter::new(None, None, None, Some("webinar"), None).is_err());
    }

    #[test]
    fn test_fair_format() {
        let catalog = seeded_catalog();
        let hits = catalog.filtered(Some(ResourceTab::Fairs), &filter(None, None, None, None, Some("hybrid")));
        assert_eq!(ids(&hits.fairs, |f| f.id.as_str()), vec!["2", "4"]);

        let hits = catalog.filtered(None, &filter(None, None, None, None, Some("in-person")));
        assert!(hits.fairs.is_empty());

        let err = ResourceFilter::new(None, None, None, None, Some("remote")).unwrap_err();
        assert_eq!(err.to_string(), "unknown format 'remote'");
    }

    #[test]
    fn test_menu_values_and_wire_names() {
        let catalog = seeded_catalog();
        assert_eq!(catalog.blog_categories().len(), 6);
        assert_eq!(
            catalog.internship_locations(),
            vec!["Remote (Worldwide)", "Remote (US Only)", "Remote (Europe)", "Remote (US, UK, Canada)"]
        );

        let json = serde_json::to_value(&catalog.events[2]).unwrap();
        assert_eq!(json["type"], "course");
        assert_eq!(json["format"], "hybrid");
        assert_eq!(json["organizerLogo"], PLACEHOLDER_LOGO);
        assert_eq!(serde_json::to_value(EventFormat::InPerson).unwrap(), "in-person");
    }
}
