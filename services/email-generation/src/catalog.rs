//! Template Catalog
//!
//! Fixed registry of built-in email templates. Entries are created at
//! process start and never mutated. A missing id is a hard error: there is
//! no default template, selection must be explicit.

use std::collections::HashMap;

use mailgen_models::{Template, TemplateCategory, TemplateDefaults, TemplateStructure};
use mailgen_utils::{MailgenError, MailgenResult};

/// Synthetic id accepted by the selection endpoint for component-built
/// templates; never present in the catalog itself.
pub const CUSTOM_TEMPLATE_ID: &str = "custom_template";

/// Default template returned when rotation is disabled and nothing is pinned.
pub const DEFAULT_TEMPLATE_ID: &str = "professional_partnership";

pub struct TemplateCatalog {
    templates: HashMap<String, Template>,
    // Registration order; rotation indexes into this, so it must be stable.
    order: Vec<String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        let mut catalog = Self {
            templates: HashMap::new(),
            order: Vec::new(),
        };

        for template in builtin_templates() {
            catalog.register(template);
        }

        catalog
    }

    /// Catalog restricted to the given templates; test scaffolding for
    /// empty-pool edge cases.
    #[cfg(test)]
    pub(crate) fn with_templates(templates: Vec<Template>) -> Self {
        let mut catalog = Self {
            templates: HashMap::new(),
            order: Vec::new(),
        };
        for template in templates {
            catalog.register(template);
        }
        catalog
    }

    fn register(&mut self, template: Template) {
        self.order.push(template.id.clone());
        self.templates.insert(template.id.clone(), template);
    }

    /// Get template by id; unknown ids are a configuration error.
    pub fn lookup(&self, template_id: &str) -> MailgenResult<&Template> {
        self.templates
            .get(template_id)
            .ok_or_else(|| MailgenError::template_not_found(template_id))
    }

    #[allow(dead_code)]
    pub fn get(&self, template_id: &str) -> Option<&Template> {
        self.templates.get(template_id)
    }

    /// All templates in registration order.
    pub fn list(&self) -> Vec<&Template> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id))
            .collect()
    }

    /// Ordered template ids, the rotation candidate pool.
    pub fn ids(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Ordered ids restricted to one category.
    pub fn ids_in_category(&self, category: TemplateCategory) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| {
                self.templates
                    .get(*id)
                    .map(|t| t.category == category)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_templates() -> Vec<Template> {
    vec![
        professional_partnership(),
        modern_tech(),
        executive_outreach(),
        product_launch(),
        consultative_sales(),
        event_invitation(),
    ]
}

fn professional_partnership() -> Template {
    Template {
        id: "professional_partnership".to_string(),
        name: "Professional Partnership".to_string(),
        description: "Clean, minimal design perfect for B2B partnership outreach".to_string(),
        preview: "A professional approach with company branding and clear value proposition"
            .to_string(),
        category: TemplateCategory::Partnership,
        structure: TemplateStructure {
            paragraphs: 3,
            components: vec![
                "logo".to_string(),
                "cta_button".to_string(),
                "testimonial".to_string(),
            ],
        },
        defaults: TemplateDefaults {
            subject: "Partnership Opportunity with {company}".to_string(),
            greeting: "Hi {name},".to_string(),
            signature: "Best regards,\\n{senderName}\\n{senderCompany}".to_string(),
            header_title: "Building Strategic Partnerships".to_string(),
            main_heading: "Revolutionizing {company} with AI-Powered Solutions".to_string(),
            button_text: "Schedule Partnership Discussion".to_string(),
            button_url: "https://calendly.com/partnership".to_string(),
            testimonial_text:
                "\"This partnership exceeded our expectations. We saw immediate results in market expansion and lead quality.\""
                    .to_string(),
            testimonial_author: "Sarah Chen, CEO at GrowthTech".to_string(),
        },
        prompt: "Generate a professional B2B partnership email with exactly 3 paragraphs:\n\n\
            Paragraph 1: Introduction and why you're reaching out to {company}\n\
            Paragraph 2: Value proposition and mutual benefits of partnership\n\
            Paragraph 3: Next steps and call to action\n\n\
            Keep it professional, concise, and focused on business value. \
            Do not include any components or HTML - just the paragraph content."
            .to_string(),
        html: r#"
<div style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 600px; margin: 0 auto; background: white;">
  <div id="component-logo" style="text-align: center; padding: 30px 20px; background: #f8f9fa; border-bottom: 2px solid #e9ecef;">
    <p style="margin: 10px 0 0; color: #6c757d; font-size: 14px;">Building Strategic Partnerships</p>
  </div>
  <div style="padding: 40px 30px;">
    <h2 style="color: #333; margin: 0 0 30px; font-size: 24px;">Hello {name}!</h2>
    <div id="generated-paragraph-1" style="margin-bottom: 25px;">
      <p style="font-size: 16px; line-height: 1.6; color: #333; margin: 0;">[GENERATED CONTENT 1: Introduction and why reaching out to {company}]</p>
    </div>
    <div id="component-cta-button" style="text-align: center; margin: 35px 0;">
      <a href="https://calendly.com/partnership" style="display: inline-block; background: #28a745; color: white; padding: 14px 30px; text-decoration: none; border-radius: 6px; font-weight: 600; font-size: 16px;">Schedule Partnership Discussion</a>
      <p style="margin: 12px 0 0; color: #6c757d; font-size: 14px;">15-minute introductory call</p>
    </div>
    <div id="generated-paragraph-2" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.6; color: #333; margin: 0;">[GENERATED CONTENT 2: Value proposition and mutual benefits]</p>
    </div>
    <div id="component-testimonial" style="background: #f8f9fa; border-left: 4px solid #28a745; padding: 20px; margin: 30px 0; border-radius: 0 6px 6px 0;">
      <blockquote style="margin: 0; font-style: italic; color: #495057; font-size: 15px; line-height: 1.5;">"This partnership exceeded our expectations. We saw immediate results in market expansion and lead quality."</blockquote>
      <cite style="display: block; text-align: right; margin-top: 12px; color: #6c757d; font-size: 14px; font-weight: 600;">Sarah Chen, CEO at GrowthTech</cite>
    </div>
    <div id="generated-paragraph-3" style="margin: 25px 0 0;">
      <p style="font-size: 16px; line-height: 1.6; color: #333; margin: 0;">[GENERATED CONTENT 3: Next steps and call to action]</p>
    </div>
  </div>
  <div style="padding: 25px 30px; background: #f8f9fa; border-top: 1px solid #e9ecef;">
    <p style="margin: 0; color: #6c757d; font-size: 14px;">Best regards,<br><strong>{senderName}</strong><br>{senderCompany}</p>
  </div>
</div>
"#
        .to_string(),
    }
}

fn modern_tech() -> Template {
    Template {
        id: "modern_tech".to_string(),
        name: "Modern Tech".to_string(),
        description: "Bold, colorful design perfect for tech companies and startups".to_string(),
        preview: "Eye-catching gradients with modern components for tech-savvy audiences"
            .to_string(),
        category: TemplateCategory::Product,
        structure: TemplateStructure {
            paragraphs: 2,
            components: vec![
                "header_banner".to_string(),
                "feature_grid".to_string(),
                "cta_button".to_string(),
                "social_proof".to_string(),
            ],
        },
        defaults: TemplateDefaults {
            subject: "Transform Your Business with AI-Powered Solutions".to_string(),
            greeting: "Hi {name},".to_string(),
            signature: "Best regards,\\n{senderName}\\n{senderCompany}".to_string(),
            header_title: "Transform Your Business with AI".to_string(),
            main_heading: "Accelerating Tech Excellence for {company}".to_string(),
            button_text: "Explore the Platform".to_string(),
            button_url: "https://demo.ourplatform.com".to_string(),
            testimonial_text: "\"Trusted by 500+ tech companies.\"".to_string(),
            testimonial_author: "Platform customers".to_string(),
        },
        prompt: "Generate a modern tech-focused email with exactly 2 paragraphs:\n\n\
            Paragraph 1: Hook about innovation and technology trends relevant to {company}\n\
            Paragraph 2: How our solution/partnership can accelerate their tech goals\n\n\
            Use modern, energetic language. Focus on innovation, scalability, and \
            cutting-edge solutions. Do not include any components or HTML."
            .to_string(),
        html: r#"
<div style="font-family: 'Inter', -apple-system, sans-serif; max-width: 600px; margin: 0 auto; background: white;">
  <div id="component-header-banner" style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 40px 30px; text-align: center; color: white;">
    <h1 style="margin: 0 0 10px; font-size: 28px; font-weight: 700;">Innovation Awaits</h1>
    <p style="margin: 0; font-size: 18px; opacity: 0.9;">Accelerating Tech Excellence for {company}</p>
  </div>
  <div style="padding: 40px 30px;">
    <div id="generated-paragraph-1" style="margin-bottom: 30px;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 1: Innovation hook and tech trends for {company}]</p>
    </div>
    <div id="component-feature-grid" style="margin: 35px 0; padding: 25px; background: linear-gradient(45deg, #f093fb 0%, #f5576c 100%); border-radius: 12px; color: white; text-align: center;">
      <h3 style="margin: 0 0 8px; font-size: 16px;">Lightning Fast</h3>
      <p style="margin: 0 0 16px; font-size: 14px; opacity: 0.9;">Instant deployment</p>
      <h3 style="margin: 0 0 8px; font-size: 16px;">Scalable Growth</h3>
      <p style="margin: 0; font-size: 14px; opacity: 0.9;">Unlimited potential</p>
    </div>
    <div id="generated-paragraph-2" style="margin: 30px 0;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 2: How our solution accelerates their tech goals]</p>
    </div>
    <div id="component-cta-button" style="text-align: center; margin: 35px 0;">
      <a href="https://demo.ourplatform.com" style="display: inline-block; background: linear-gradient(45deg, #ff6b6b, #4ecdc4); color: white; padding: 16px 35px; text-decoration: none; border-radius: 50px; font-weight: 600; font-size: 17px;">Explore the Platform</a>
      <p style="margin: 15px 0 0; color: #666; font-size: 14px;">Live demo, no signup required</p>
    </div>
  </div>
  <div id="component-social-proof" style="background: #1a1a2e; color: white; padding: 30px; text-align: center;">
    <p style="margin: 0; font-size: 16px;">Trusted by 500+ tech companies</p>
  </div>
</div>
"#
        .to_string(),
    }
}

fn executive_outreach() -> Template {
    Template {
        id: "executive_outreach".to_string(),
        name: "Executive Outreach".to_string(),
        description: "Sophisticated design for C-level executive communications".to_string(),
        preview: "Elegant, premium look with executive-focused messaging and components"
            .to_string(),
        category: TemplateCategory::Partnership,
        structure: TemplateStructure {
            paragraphs: 4,
            components: vec![
                "executive_header".to_string(),
                "stats_showcase".to_string(),
                "testimonial".to_string(),
            ],
        },
        defaults: TemplateDefaults {
            subject: "Strategic Partnership Proposal for {company}".to_string(),
            greeting: "Dear {name},".to_string(),
            signature: "Respectfully,\\n{senderName}\\n{senderCompany}".to_string(),
            header_title: "Executive Partnership Proposal".to_string(),
            main_heading: "Strategic Partnership Opportunity".to_string(),
            button_text: "Schedule Executive Briefing".to_string(),
            button_url: "https://calendly.com/executive".to_string(),
            testimonial_text:
                "\"This strategic partnership transformed our market position. The executive team was impressed with both the strategic vision and execution capabilities.\""
                    .to_string(),
            testimonial_author: "Michael Rodriguez, CEO & Chairman, Enterprise Solutions Inc."
                .to_string(),
        },
        prompt: "Generate an executive-level email with exactly 4 paragraphs:\n\n\
            Paragraph 1: Executive summary of opportunity relevant to {company}\n\
            Paragraph 2: Strategic implications and market positioning\n\
            Paragraph 3: Competitive advantages and ROI potential\n\
            Paragraph 4: Executive-level next steps and meeting request\n\n\
            Use sophisticated, strategic language appropriate for C-level executives. \
            Focus on business outcomes, ROI, and strategic value."
            .to_string(),
        html: r#"
<div style="font-family: 'Georgia', serif; max-width: 650px; margin: 0 auto; background: white; border: 1px solid #e5e5e5;">
  <div id="component-executive-header" style="background: #2c3e50; color: white; padding: 35px 40px; border-bottom: 3px solid #34495e;">
    <h1 style="margin: 0 0 8px; font-size: 26px; font-weight: 400; letter-spacing: 0.5px;">Strategic Partnership Opportunity</h1>
    <p style="margin: 0; font-size: 16px; opacity: 0.9;">Exclusively for {company} Leadership</p>
  </div>
  <div style="padding: 45px 40px;">
    <p style="margin: 0 0 25px; font-size: 18px; color: #2c3e50;">Dear {name},</p>
    <div id="generated-paragraph-1" style="margin-bottom: 25px;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 1: Executive summary of opportunity for {company}]</p>
    </div>
    <div id="component-stats-showcase" style="background: #ecf0f1; padding: 30px; margin: 35px 0; border-left: 4px solid #3498db;">
      <h3 style="margin: 0 0 20px; color: #2c3e50; font-size: 20px;">Strategic Impact Metrics</h3>
      <p style="margin: 0; color: #7f8c8d;">340% ROI Increase &middot; 18 Mo Avg. Payback &middot; 95% Success Rate</p>
    </div>
    <div id="generated-paragraph-2" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 2: Strategic implications and market positioning]</p>
    </div>
    <div id="generated-paragraph-3" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 3: Competitive advantages and ROI potential]</p>
    </div>
    <div id="component-testimonial" style="background: #f8f9fa; border: 1px solid #dee2e6; padding: 25px; margin: 35px 0; border-radius: 4px;">
      <blockquote style="margin: 0 0 15px; font-style: italic; color: #495057; font-size: 16px; line-height: 1.6;">"This strategic partnership transformed our market position."</blockquote>
      <cite style="font-weight: 600; color: #2c3e50; font-style: normal;">Michael Rodriguez, CEO &amp; Chairman, Enterprise Solutions Inc.</cite>
    </div>
    <div id="generated-paragraph-4" style="margin: 25px 0 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 4: Executive-level next steps and meeting request]</p>
    </div>
  </div>
  <div style="padding: 30px 40px; background: #f8f9fa; border-top: 1px solid #dee2e6;">
    <p style="margin: 0; color: #495057;">Respectfully,<br><strong style="color: #2c3e50;">{senderName}</strong><br>{senderCompany}</p>
  </div>
</div>
"#
        .to_string(),
    }
}

fn product_launch() -> Template {
    Template {
        id: "product_launch".to_string(),
        name: "Product Launch".to_string(),
        description: "Dynamic design perfect for product announcements and launches".to_string(),
        preview: "Engaging layout with product showcase and interactive elements".to_string(),
        category: TemplateCategory::Product,
        structure: TemplateStructure {
            paragraphs: 3,
            components: vec![
                "product_hero".to_string(),
                "feature_highlights".to_string(),
                "countdown_timer".to_string(),
                "cta_button".to_string(),
            ],
        },
        defaults: TemplateDefaults {
            subject: "Exclusive Early Access: Revolutionary New Platform".to_string(),
            greeting: "Hi {name},".to_string(),
            signature: "Best regards,\\n{senderName}\\n{senderCompany}".to_string(),
            header_title: "Introducing Revolutionary Solutions".to_string(),
            main_heading: "Game-changing solution for {company}".to_string(),
            button_text: "Get Early Access Now".to_string(),
            button_url: "https://earlyaccess.product.com".to_string(),
            testimonial_text: "\"10x faster results from day one.\"".to_string(),
            testimonial_author: "Early access customer".to_string(),
        },
        prompt: "Generate a product launch email with exactly 3 paragraphs:\n\n\
            Paragraph 1: Exciting announcement about new product/service launch relevant to {company}\n\
            Paragraph 2: Key benefits and how it solves problems for companies like {company}\n\
            Paragraph 3: Exclusive early access offer and urgency to act\n\n\
            Use excited, energetic language. Create anticipation and urgency. \
            Focus on innovation and exclusive access."
            .to_string(),
        html: r#"
<div style="font-family: 'Helvetica Neue', Arial, sans-serif; max-width: 600px; margin: 0 auto; background: white;">
  <div id="component-product-hero" style="background: linear-gradient(45deg, #ff9a9e 0%, #fecfef 100%); padding: 50px 30px; text-align: center; color: #333;">
    <div style="background: white; padding: 20px; border-radius: 15px; display: inline-block;">
      <h1 style="margin: 0 0 10px; font-size: 24px; font-weight: 700; color: #333;">Revolutionary Launch</h1>
      <p style="margin: 0; color: #666; font-size: 16px;">Game-changing solution for {company}</p>
    </div>
  </div>
  <div style="padding: 40px 30px;">
    <div id="generated-paragraph-1" style="margin-bottom: 30px;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 1: Exciting product announcement for {company}]</p>
    </div>
    <div id="component-feature-highlights" style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 15px; margin: 35px 0; text-align: center;">
      <h3 style="margin: 0 0 15px; font-size: 20px;">What's Inside</h3>
      <p style="margin: 0; font-size: 14px; opacity: 0.9;">Smart Targeting &middot; Lightning Speed &middot; Real-time Analytics &middot; Enterprise Security</p>
    </div>
    <div id="generated-paragraph-2" style="margin: 30px 0;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 2: Key benefits for companies like {company}]</p>
    </div>
    <div id="component-countdown-timer" style="background: #ff6b6b; color: white; padding: 25px; text-align: center; border-radius: 10px; margin: 35px 0;">
      <h3 style="margin: 0 0 10px; font-size: 18px;">Limited Time Exclusive Access</h3>
      <p style="margin: 0; font-size: 14px; opacity: 0.9;">Early access ends soon!</p>
    </div>
    <div id="generated-paragraph-3" style="margin: 30px 0;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 3: Exclusive early access and urgency]</p>
    </div>
    <div id="component-cta-button" style="text-align: center; margin: 35px 0;">
      <a href="https://earlyaccess.product.com" style="display: inline-block; background: linear-gradient(45deg, #ff6b6b, #ffa500); color: white; padding: 18px 40px; text-decoration: none; border-radius: 50px; font-weight: 700; font-size: 18px; text-transform: uppercase; letter-spacing: 1px;">Get Early Access Now</a>
    </div>
  </div>
</div>
"#
        .to_string(),
    }
}

fn consultative_sales() -> Template {
    Template {
        id: "consultative_sales".to_string(),
        name: "Consultative Sales".to_string(),
        description: "Trust-building design for consultative sales approaches".to_string(),
        preview: "Professional layout emphasizing expertise and thought leadership".to_string(),
        category: TemplateCategory::Partnership,
        structure: TemplateStructure {
            paragraphs: 5,
            components: vec![
                "expert_header".to_string(),
                "case_study".to_string(),
                "methodology".to_string(),
                "cta_consultation".to_string(),
            ],
        },
        defaults: TemplateDefaults {
            subject: "Strategic Assessment Opportunity for {company}".to_string(),
            greeting: "Dear {name},".to_string(),
            signature: "Best regards,\\n{senderName}\\n{senderCompany}".to_string(),
            header_title: "Strategic Business Partnership".to_string(),
            main_heading: "Insights for {company} Leadership".to_string(),
            button_text: "Schedule Assessment".to_string(),
            button_url: "https://consultation.company.com".to_string(),
            testimonial_text:
                "\"Similar manufacturing company increased operational efficiency by 180% and reduced costs by $2.3M annually using our strategic framework.\""
                    .to_string(),
            testimonial_author: "Manufacturing Industry, 500+ employees".to_string(),
        },
        prompt: "Generate a consultative sales email with exactly 5 paragraphs:\n\n\
            Paragraph 1: Industry insight or trend observation relevant to {company}\n\
            Paragraph 2: Challenge identification specific to companies like {company}\n\
            Paragraph 3: Our methodology and approach to solving this challenge\n\
            Paragraph 4: Case study preview or success story example\n\
            Paragraph 5: Soft consultation offer and value-first approach\n\n\
            Use consultative, advisory tone. Position as expert advisor, not salesperson. \
            Focus on insights and value."
            .to_string(),
        html: r#"
<div style="font-family: 'Times New Roman', serif; max-width: 620px; margin: 0 auto; background: white; border: 2px solid #e8e8e8;">
  <div id="component-expert-header" style="background: white; padding: 35px 40px; border-bottom: 1px solid #ddd;">
    <h2 style="margin: 0 0 5px; font-size: 22px; color: #2c3e50;">Strategic Advisory</h2>
    <p style="margin: 0; color: #7f8c8d; font-size: 16px;">Insights for {company} Leadership</p>
  </div>
  <div style="padding: 40px;">
    <p style="margin: 0 0 25px; font-size: 16px; color: #2c3e50;">Dear {name},</p>
    <div id="generated-paragraph-1" style="margin-bottom: 25px;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 1: Industry insight relevant to {company}]</p>
    </div>
    <div id="generated-paragraph-2" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 2: Challenge identification for {company}]</p>
    </div>
    <div id="component-methodology" style="background: #f8f9fa; border: 1px solid #dee2e6; padding: 30px; margin: 35px 0; text-align: center;">
      <h3 style="margin: 0 0 15px; color: #2c3e50; font-size: 18px;">Our Proven Framework</h3>
      <p style="margin: 0; font-size: 13px; color: #7f8c8d;">1. ANALYZE &middot; 2. STRATEGIZE &middot; 3. EXECUTE</p>
    </div>
    <div id="generated-paragraph-3" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 3: Our methodology and approach]</p>
    </div>
    <div id="component-case-study" style="border-left: 4px solid #f39c12; background: #fef9e7; padding: 25px; margin: 35px 0;">
      <h3 style="margin: 0 0 15px; color: #d68910; font-size: 16px;">Recent Success Story</h3>
      <p style="margin: 0; font-style: italic; color: #6c757d; font-size: 15px; line-height: 1.6;">"Similar manufacturing company increased operational efficiency by 180% using our strategic framework."</p>
    </div>
    <div id="generated-paragraph-4" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 4: Case study preview and success examples]</p>
    </div>
    <div id="generated-paragraph-5" style="margin: 25px 0;">
      <p style="font-size: 16px; line-height: 1.8; color: #333; margin: 0;">[GENERATED CONTENT 5: Consultation offer and value-first approach]</p>
    </div>
    <div id="component-cta-consultation" style="background: #2c3e50; color: white; padding: 25px; text-align: center; margin: 35px 0; border-radius: 5px;">
      <h3 style="margin: 0 0 15px; font-size: 18px;">Complimentary Strategic Assessment</h3>
      <a href="https://consultation.company.com" style="display: inline-block; background: white; color: #2c3e50; padding: 12px 25px; text-decoration: none; border-radius: 4px; font-weight: 600;">Schedule Assessment</a>
    </div>
  </div>
  <div style="padding: 25px 40px; background: #f8f9fa; border-top: 1px solid #dee2e6;">
    <p style="margin: 0; color: #495057; font-size: 14px;">Best regards,<br><strong style="color: #2c3e50;">{senderName}</strong><br>{senderCompany}</p>
  </div>
</div>
"#
        .to_string(),
    }
}

fn event_invitation() -> Template {
    Template {
        id: "event_invitation".to_string(),
        name: "Event Invitation".to_string(),
        description: "Engaging design for event invitations and community building".to_string(),
        preview: "Vibrant layout perfect for webinars, conferences, and networking events"
            .to_string(),
        category: TemplateCategory::Event,
        structure: TemplateStructure {
            paragraphs: 3,
            components: vec![
                "event_hero".to_string(),
                "agenda_timeline".to_string(),
                "speaker_showcase".to_string(),
                "registration_cta".to_string(),
            ],
        },
        defaults: TemplateDefaults {
            subject: "You're Invited: Future of Business Summit".to_string(),
            greeting: "Hi {name},".to_string(),
            signature: "Best regards,\\n{senderName}\\n{senderCompany}".to_string(),
            header_title: "Industry Innovation Summit".to_string(),
            main_heading: "Specially curated for {company} and industry leaders".to_string(),
            button_text: "Register Free Now".to_string(),
            button_url: "https://register.event.com".to_string(),
            testimonial_text: "\"Join 200+ industry leaders.\"".to_string(),
            testimonial_author: "Industry Leaders Network".to_string(),
        },
        prompt: "Generate an event invitation email with exactly 3 paragraphs:\n\n\
            Paragraph 1: Exciting event announcement and why it's valuable for {company}\n\
            Paragraph 2: Key topics, speakers, and exclusive insights they'll gain\n\
            Paragraph 3: Limited spots available and encouragement to register now\n\n\
            Use enthusiastic, community-building language. Create excitement about \
            networking and learning opportunities."
            .to_string(),
        html: r#"
<div style="font-family: 'Nunito', -apple-system, sans-serif; max-width: 600px; margin: 0 auto; background: white;">
  <div id="component-event-hero" style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px 30px; text-align: center;">
    <div style="background: rgba(255,255,255,0.2); display: inline-block; padding: 8px 20px; border-radius: 20px; margin-bottom: 20px; font-size: 14px; font-weight: 600;">EXCLUSIVE EVENT</div>
    <h1 style="margin: 0 0 15px; font-size: 28px; font-weight: 700;">Future of Business Summit</h1>
    <p style="margin: 0; font-size: 18px; opacity: 0.9;">Specially curated for {company} and industry leaders</p>
  </div>
  <div style="padding: 40px 30px;">
    <div id="generated-paragraph-1" style="margin-bottom: 30px;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 1: Event announcement and value for {company}]</p>
    </div>
    <div id="component-agenda-timeline" style="background: #f8f9ff; padding: 30px; border-radius: 12px; margin: 35px 0;">
      <h3 style="margin: 0 0 15px; text-align: center; color: #333; font-size: 20px;">Event Agenda</h3>
      <p style="margin: 0 0 10px; color: #666; font-size: 14px;">2:00 PM - Opening Keynote: Digital Transformation Trends</p>
      <p style="margin: 0 0 10px; color: #666; font-size: 14px;">2:45 PM - Panel: Scaling for Growth</p>
      <p style="margin: 0; color: #666; font-size: 14px;">3:30 PM - Networking &amp; Q&amp;A</p>
    </div>
    <div id="generated-paragraph-2" style="margin: 30px 0;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 2: Key topics, speakers, and insights]</p>
    </div>
    <div id="generated-paragraph-3" style="margin: 30px 0;">
      <p style="font-size: 17px; line-height: 1.7; color: #333; margin: 0;">[GENERATED CONTENT 3: Limited spots and registration encouragement]</p>
    </div>
    <div id="component-registration-cta" style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 35px; text-align: center; border-radius: 15px; margin: 35px 0;">
      <h3 style="margin: 0 0 15px; font-size: 22px;">Reserve Your Spot</h3>
      <p style="margin: 0 0 25px; font-size: 16px; opacity: 0.9;">Join 200+ industry leaders, complimentary attendance</p>
      <a href="https://register.event.com" style="display: inline-block; background: white; color: #667eea; padding: 16px 35px; text-decoration: none; border-radius: 50px; font-weight: 700; font-size: 17px;">Register Free Now</a>
    </div>
  </div>
</div>
"#
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_template() {
        let catalog = TemplateCatalog::new();
        let template = catalog.lookup("modern_tech").unwrap();
        assert_eq!(template.name, "Modern Tech");
        assert_eq!(template.structure.paragraphs, 2);
    }

    #[test]
    fn test_lookup_unknown_template_is_hard_error() {
        let catalog = TemplateCatalog::new();
        let err = catalog.lookup("no_such_template").unwrap_err();
        assert!(matches!(err, MailgenError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_ids_are_ordered_and_complete() {
        let catalog = TemplateCatalog::new();
        let ids = catalog.ids();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], "professional_partnership");
        assert_eq!(ids[5], "event_invitation");
    }

    #[test]
    fn test_category_filter() {
        let catalog = TemplateCatalog::new();
        let partnership = catalog.ids_in_category(TemplateCategory::Partnership);
        assert_eq!(
            partnership,
            vec![
                "professional_partnership".to_string(),
                "executive_outreach".to_string(),
                "consultative_sales".to_string(),
            ]
        );
        assert_eq!(
            catalog.ids_in_category(TemplateCategory::Event),
            vec!["event_invitation".to_string()]
        );
    }

    #[test]
    fn test_every_template_carries_placeholder_markup() {
        let catalog = TemplateCatalog::new();
        for template in catalog.list() {
            assert!(
                template.html.contains("{company}"),
                "{} lost its {{company}} placeholder",
                template.id
            );
            assert!(!template.prompt.is_empty());
            assert!(template.structure.paragraphs >= 1);
        }
    }
}
